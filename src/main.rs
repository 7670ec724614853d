use anyhow::{bail, Context};
use clap::Parser;
use policy_review::{batch, cache::CacheFile, cli, config, export, history, scanner, server};
use cli::{Cli, Commands};
use config::Config;
use policy_review_common::preferences::{HistoryEntry, PreferenceStore};
use policy_review_common::AnalysisReport;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("policy_review={0},tower_http={0}", default_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn report_path(output_dir: &Path, file_name: &str) -> PathBuf {
    let stem = policy_review_common::export::file_stem(file_name);
    output_dir.join(format!("{}.report.json", stem))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            path,
            output,
            export: formats,
            recursive,
            use_cache,
            no_fallback,
            no_history,
        } => {
            println!("📑 policy-review - 취업규칙 분석\n");
            if no_fallback {
                config.fallback = false;
            }
            let kind = cli.scorer.unwrap_or(config.scorer);

            // 1. 문서 검색
            println!("[1/3] 문서 검색 중...");
            let files = scanner::scan_path(&path, recursive)?;
            println!("✔ {}개 문서 발견\n", files.len());

            if files.is_empty() {
                bail!(policy_review::error::ReviewError::NoDocumentsFound(format!(
                    "{} ({})",
                    path.display(),
                    scanner::supported_extensions()
                )));
            }

            let base_dir = if path.is_dir() {
                path.clone()
            } else {
                path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
            };

            // 2. 분석
            println!(
                "[2/3] 분석 중... ({}){}",
                kind.ai_mode(),
                if use_cache { " (캐시 사용)" } else { "" }
            );
            let client = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_seconds.max(1)))
                .build()?;

            let mut cache = if use_cache {
                Some(CacheFile::load(&base_dir))
            } else {
                None
            };
            let outcomes =
                batch::analyze_files(&files, kind, &config, &client, cache.as_mut(), true).await;
            if let Some(cache) = &cache {
                cache.save(&base_dir)?;
            }
            println!();

            // 3. 저장
            println!("[3/3] 결과 저장 중...");
            let output_dir = output.unwrap_or_else(|| base_dir.clone());
            std::fs::create_dir_all(&output_dir)?;

            let store = history::FilePreferenceStore::default_location()?;
            let mut entries = Vec::new();
            let mut failures = 0;

            for outcome in &outcomes {
                let report = match &outcome.result {
                    Ok(report) => report,
                    Err(e) => {
                        failures += 1;
                        println!("✘ {}: {}", outcome.file.file_name, e);
                        continue;
                    }
                };

                let json_path = report_path(&output_dir, &outcome.file.file_name);
                std::fs::write(&json_path, serde_json::to_string_pretty(report)?)?;
                println!(
                    "✔ {} → {}점 ({}) 위험도 {}{}",
                    outcome.file.file_name,
                    report.compliance_score,
                    report.compliance_grade,
                    report.risk_level,
                    if outcome.cached { " [캐시]" } else { "" }
                );
                println!("  보고서: {}", json_path.display());

                if !formats.is_empty() {
                    for written in export::export_report(report, &formats, &output_dir)? {
                        println!("  내보내기: {}", written.display());
                    }
                }

                if let (false, Some(id)) = (no_history, &outcome.fingerprint) {
                    entries.push(HistoryEntry::from_report(id.clone(), report).without_report());
                }
            }

            if !entries.is_empty() {
                // 설정 파일을 읽지 못하면 덮어쓰지 않는다
                if let Err(e) = history::record_entries(&store, entries) {
                    tracing::warn!(path = %store.path().display(), "히스토리 저장 건너뜀: {}", e);
                }
            }

            if failures > 0 {
                println!("\n⚠ {}건 실패", failures);
            }
            println!("\n✅ 분석 완료");
        }

        Commands::Export {
            input,
            format,
            output,
        } => {
            println!("📄 policy-review - 내보내기\n");

            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("보고서를 읽을 수 없습니다: {}", input.display()))?;
            let report: AnalysisReport = serde_json::from_str(&content)?;

            let output = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            for written in export::export_report(&report, &format, &output)? {
                println!("✔ {}", written.display());
            }

            println!("\n✅ 내보내기 완료");
        }

        Commands::Serve { bind, static_dir } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(kind) = cli.scorer {
                config.scorer = kind;
            }
            println!("🌐 policy-review - API 서버 ({})", config.bind);
            server::serve(config, static_dir).await?;
        }

        Commands::Config {
            set_api_key,
            provider,
            set_scorer,
            show,
        } => {
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.set_api_key(provider.into(), key);
                changed = true;
                println!("✔ API 키를 설정했습니다 ({:?})", provider);
            }

            if let Some(kind) = set_scorer {
                config.scorer = kind;
                changed = true;
                println!("✔ 기본 분석 방식: {}", kind.ai_mode());
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                let key_state = |key: &Option<String>| if key.is_some() { "설정됨" } else { "미설정" };
                println!("설정: {}", Config::config_path()?.display());
                println!("  분석 방식: {}", config.scorer);
                println!("  OpenAI 모델: {} ({})", config.openai_model, key_state(&config.openai_api_key));
                println!(
                    "  Anthropic 모델: {} ({})",
                    config.anthropic_model,
                    key_state(&config.anthropic_api_key)
                );
                println!("  최소 글자 수: {}", config.min_content_chars);
                println!("  대체 분석: {}", if config.fallback { "사용" } else { "사용 안 함" });
                println!("  서버 주소: {}", config.bind);
            }
        }

        Commands::History { clear } => {
            let store = history::FilePreferenceStore::default_location()?;
            let mut prefs = store.load()?;

            if clear {
                prefs.clear_history();
                store.save(&prefs)?;
                println!("✔ 히스토리를 삭제했습니다");
            } else if prefs.history.is_empty() {
                println!("분석 히스토리가 없습니다");
            } else {
                println!("최근 분석 ({}건):", prefs.history.len());
                for (i, entry) in prefs.history.iter().enumerate() {
                    println!(
                        "  {:>2}. {}  {}  {}점 ({}) 위험도 {}",
                        i + 1,
                        entry.analyzed_at,
                        entry.file_name,
                        entry.compliance_score,
                        entry.compliance_grade,
                        entry.risk_level
                    );
                }
            }
        }

        Commands::Cache {
            clear,
            folder,
            info,
        } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("캐시 정보:");
                    println!("  경로: {}", cache_path.display());
                    println!("  건수: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  크기: {} bytes", meta.len());
                    }
                } else {
                    println!("캐시 파일이 없습니다: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ 캐시를 삭제했습니다: {}", cache_path.display()),
                    Ok(false) => println!("캐시 파일이 없습니다"),
                    Err(e) => println!("캐시 삭제 오류: {}", e),
                }
            }
        }
    }

    Ok(())
}
