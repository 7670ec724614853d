use crate::scorer::ScorerKind;
use clap::{Parser, Subcommand, ValueEnum};
use policy_review_common::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policy-review")]
#[command(about = "취업규칙 법령 준수 검토 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 분석 방식 (설정 파일의 기본값 대신 사용)
    #[arg(long, global = true)]
    pub scorer: Option<ScorerKind>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 문서 (파일 또는 폴더)를 분석해 보고서 JSON을 저장
    Analyze {
        /// 문서 파일 또는 폴더 경로
        #[arg(required = true)]
        path: PathBuf,

        /// 보고서 저장 폴더 (기본: 문서와 같은 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 보고서와 함께 내보낼 형식 (csv/tsv/word/json/text, 쉼표로 여러 개)
        #[arg(short, long, value_delimiter = ',')]
        export: Vec<ExportFormat>,

        /// 하위 폴더까지 검색
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 캐시 사용 (같은 문서 재분석 생략)
        #[arg(long)]
        use_cache: bool,

        /// AI 실패 시 키워드 분석으로 대체하지 않음
        #[arg(long)]
        no_fallback: bool,

        /// 분석 히스토리에 기록하지 않음
        #[arg(long)]
        no_history: bool,
    },

    /// 보고서 JSON을 CSV/TSV/Word 등으로 변환
    Export {
        /// 보고서 JSON 파일
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 형식 (쉼표로 여러 개)
        #[arg(short, long, value_delimiter = ',', default_value = "csv")]
        format: Vec<ExportFormat>,

        /// 출력 파일/폴더
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// API 서버 실행
    Serve {
        /// 바인드 주소 (예: 0.0.0.0:3000)
        #[arg(short, long)]
        bind: Option<String>,

        /// 함께 제공할 정적 파일 폴더 (web-wasm 빌드 결과)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// 설정 표시/편집
    Config {
        /// API 키 설정 (--provider와 함께)
        #[arg(long)]
        set_api_key: Option<String>,

        /// API 키 대상
        #[arg(long, default_value = "openai")]
        provider: ProviderArg,

        /// 기본 분석 방식 설정
        #[arg(long)]
        set_scorer: Option<ScorerKind>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },

    /// 분석 히스토리 (최근 10건)
    History {
        /// 히스토리 삭제
        #[arg(long)]
        clear: bool,
    },

    /// 캐시 관리
    Cache {
        /// 캐시 삭제
        #[arg(long)]
        clear: bool,

        /// 대상 폴더 (생략 시 현재 폴더)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 캐시 정보 표시
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for crate::scorer::Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => crate::scorer::Provider::OpenAi,
            ProviderArg::Anthropic => crate::scorer::Provider::Anthropic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "policy-review",
            "analyze",
            "docs",
            "--export",
            "csv,word",
            "--scorer",
            "anthropic",
            "-r",
        ])
        .unwrap();
        assert_eq!(cli.scorer, Some(ScorerKind::Anthropic));
        match cli.command {
            Commands::Analyze {
                path,
                export,
                recursive,
                ..
            } => {
                assert_eq!(path, PathBuf::from("docs"));
                assert_eq!(export, vec![ExportFormat::Csv, ExportFormat::Word]);
                assert!(recursive);
            }
            _ => panic!("analyze가 아님"),
        }
    }

    #[test]
    fn test_export_default_format() {
        let cli = Cli::try_parse_from(["policy-review", "export", "report.json"]).unwrap();
        match cli.command {
            Commands::Export { format, .. } => assert_eq!(format, vec![ExportFormat::Csv]),
            _ => panic!("export가 아님"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["policy-review", "export", "r.json", "-f", "pdf"]).is_err());
    }
}
