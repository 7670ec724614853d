//! CLI 일괄 분석
//!
//! 문서마다 진행 바를 띄우고, 분석 future와 진행률 타이머를 함께 돌린다.
//! 진행률은 장식용이며 분석이 끝나면 100으로 맞춘다.

use crate::cache::CacheFile;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::{self, DocumentFile};
use crate::scorer::{self, ScorerKind};
use indicatif::{ProgressBar, ProgressStyle};
use policy_review_common::session::{MAX_PROGRESS_STEP, PROGRESS_CAP, PROGRESS_TICK_MS};
use policy_review_common::AnalysisReport;
use std::future::Future;
use std::time::Duration;

/// 문서 한 건의 결과
pub struct Outcome {
    pub file: DocumentFile,
    pub fingerprint: Option<String>,
    pub cached: bool,
    pub result: Result<AnalysisReport>,
}

pub fn progress_bar(file_name: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("  {prefix} [{bar:30.cyan/blue}] {pos:>3}%") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_prefix(file_name.to_string());
    bar
}

/// 타이머로 진행 바를 올리면서 future 완료를 기다린다
pub async fn with_progress<F: Future>(bar: &ProgressBar, fut: F) -> F::Output {
    tokio::pin!(fut);
    let mut ticker = tokio::time::interval(Duration::from_millis(PROGRESS_TICK_MS as u64));
    let mut progress = 0.0_f64;

    loop {
        tokio::select! {
            output = &mut fut => {
                bar.set_position(100);
                bar.finish();
                return output;
            }
            _ = ticker.tick() => {
                let step = rand::random::<f64>() * MAX_PROGRESS_STEP;
                progress = (progress + step).min(PROGRESS_CAP);
                bar.set_position(progress as u64);
            }
        }
    }
}

/// 문서 목록을 순서대로 분석
pub async fn analyze_files(
    files: &[DocumentFile],
    kind: ScorerKind,
    config: &Config,
    client: &reqwest::Client,
    mut cache: Option<&mut CacheFile>,
    show_progress: bool,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(files.len());

    for file in files {
        let document = match scanner::load_document(file, config.min_content_chars) {
            Ok(doc) => doc,
            Err(e) => {
                outcomes.push(Outcome {
                    file: file.clone(),
                    fingerprint: None,
                    cached: false,
                    result: Err(e),
                });
                continue;
            }
        };
        let fingerprint = document.fingerprint();

        if let Some(report) = cache.as_deref().and_then(|c| c.get(&document, kind)) {
            tracing::debug!(file = %file.file_name, "캐시 사용");
            outcomes.push(Outcome {
                file: file.clone(),
                fingerprint: Some(fingerprint),
                cached: true,
                result: Ok(report.clone()),
            });
            continue;
        }

        let bar = progress_bar(&file.file_name, show_progress);
        let scored = with_progress(&bar, scorer::analyze_scored(kind, config, client, &document)).await;

        // 대체된 결과는 캐시하지 않는다. 다음 실행에서 AI를 다시 호출해야 한다.
        if let (Some(cache), Ok(scored)) = (cache.as_deref_mut(), &scored) {
            if !scored.fell_back(kind) {
                cache.insert(&document, kind, scored.report.clone());
            }
        }
        let result = scored.map(|scored| scored.report);

        outcomes.push(Outcome {
            file: file.clone(),
            fingerprint: Some(fingerprint),
            cached: false,
            result,
        });
    }

    outcomes
}
