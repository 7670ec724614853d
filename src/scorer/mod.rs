//! 분석 방식 (키워드 / 데모 / OpenAI / Anthropic)
//!
//! 모든 방식은 같은 AnalysisReport를 만든다. AI 호출이 실패하면
//! 설정에 따라 키워드 분석으로 한 번 대체한다 (재시도 없음).

mod heuristic;
mod llm;
mod mock;

pub use heuristic::{HeuristicScorer, RandomJitter};
pub use llm::{LlmScorer, Provider};
pub use mock::MockScorer;

use crate::config::Config;
use crate::error::Result;
use clap::ValueEnum;
use policy_review_common::{AnalysisReport, Document, ReportMeta};
use serde::{Deserialize, Serialize};
use std::future::Future;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// 키워드 분석
    #[default]
    Heuristic,
    /// 데모 데이터
    Mock,
    /// OpenAI Chat Completions
    Openai,
    /// Anthropic Messages
    Anthropic,
}

impl ScorerKind {
    /// 보고서 aiMode에 기록되는 이름
    pub fn ai_mode(&self) -> &'static str {
        match self {
            ScorerKind::Heuristic => "키워드 분석",
            ScorerKind::Mock => "데모 데이터",
            ScorerKind::Openai => "OpenAI GPT 분석",
            ScorerKind::Anthropic => "Anthropic Claude 분석",
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            ScorerKind::Openai => Some(Provider::OpenAi),
            ScorerKind::Anthropic => Some(Provider::Anthropic),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScorerKind::Heuristic => "heuristic",
            ScorerKind::Mock => "mock",
            ScorerKind::Openai => "openai",
            ScorerKind::Anthropic => "anthropic",
        };
        f.write_str(name)
    }
}

/// 문서 한 건을 보고서로
pub trait Scorer {
    fn kind(&self) -> ScorerKind;

    /// `meta`는 호출하는 쪽이 채워서 넘기고, 그대로 보고서에 실린다
    fn score(
        &self,
        document: &Document,
        meta: ReportMeta,
    ) -> impl Future<Output = Result<AnalysisReport>> + Send;
}

/// 설정으로 고른 분석기
pub enum AnyScorer {
    Heuristic(HeuristicScorer),
    Mock(MockScorer),
    Llm(LlmScorer),
}

impl AnyScorer {
    /// AI 방식인데 키가 없으면 MissingApiKey 오류
    pub fn build(kind: ScorerKind, config: &Config, client: &reqwest::Client) -> Result<Self> {
        Ok(match kind {
            ScorerKind::Heuristic => AnyScorer::Heuristic(HeuristicScorer::from_config(config)),
            ScorerKind::Mock => AnyScorer::Mock(MockScorer),
            ScorerKind::Openai => {
                AnyScorer::Llm(LlmScorer::from_config(Provider::OpenAi, config, client.clone())?)
            }
            ScorerKind::Anthropic => {
                AnyScorer::Llm(LlmScorer::from_config(Provider::Anthropic, config, client.clone())?)
            }
        })
    }
}

impl Scorer for AnyScorer {
    fn kind(&self) -> ScorerKind {
        match self {
            AnyScorer::Heuristic(s) => s.kind(),
            AnyScorer::Mock(s) => s.kind(),
            AnyScorer::Llm(s) => s.kind(),
        }
    }

    async fn score(&self, document: &Document, meta: ReportMeta) -> Result<AnalysisReport> {
        match self {
            AnyScorer::Heuristic(s) => s.score(document, meta).await,
            AnyScorer::Mock(s) => s.score(document, meta).await,
            AnyScorer::Llm(s) => s.score(document, meta).await,
        }
    }
}

/// 분석 시각이 찍힌 메타데이터
pub fn report_meta(document: &Document, ai_mode: &str) -> ReportMeta {
    let now = chrono::Local::now();
    ReportMeta::for_document(document, ai_mode).with_timestamp(
        now.format("%Y. %-m. %-d.").to_string(),
        now.format("%H:%M:%S").to_string(),
    )
}

/// 분석 결과와 실제로 보고서를 만든 방식
#[derive(Debug, Clone)]
pub struct Scored {
    pub report: AnalysisReport,
    pub scorer: ScorerKind,
}

impl Scored {
    /// 요청한 방식 대신 키워드 분석으로 대체되었는가
    pub fn fell_back(&self, requested: ScorerKind) -> bool {
        self.scorer != requested
    }
}

/// 지정 방식으로 분석하고, AI 단계가 실패하면 키워드 분석으로 대체
pub async fn analyze_with_fallback(
    kind: ScorerKind,
    config: &Config,
    client: &reqwest::Client,
    document: &Document,
) -> Result<AnalysisReport> {
    analyze_scored(kind, config, client, document)
        .await
        .map(|scored| scored.report)
}

/// `analyze_with_fallback`와 같되, 대체 여부를 함께 돌려준다
pub async fn analyze_scored(
    kind: ScorerKind,
    config: &Config,
    client: &reqwest::Client,
    document: &Document,
) -> Result<Scored> {
    let attempt = match AnyScorer::build(kind, config, client) {
        Ok(scorer) => scorer.score(document, report_meta(document, kind.ai_mode())).await,
        Err(e) => Err(e),
    };

    match attempt {
        Ok(report) => {
            tracing::info!(
                file = %document.file_name,
                scorer = %kind,
                score = report.compliance_score,
                "분석 완료"
            );
            Ok(Scored { report, scorer: kind })
        }
        Err(e) if config.fallback && e.is_external() => {
            tracing::warn!(
                file = %document.file_name,
                scorer = %kind,
                category = e.category(),
                error = %e,
                "AI 분석 실패, 키워드 분석으로 대체"
            );
            let mode = format!("{} (AI 분석 실패로 대체)", ScorerKind::Heuristic.ai_mode());
            let report = HeuristicScorer::from_config(config)
                .score(document, report_meta(document, &mode))
                .await?;
            Ok(Scored {
                report,
                scorer: ScorerKind::Heuristic,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use policy_review_common::ItemStatus;

    fn document() -> Document {
        Document {
            file_name: "rules.txt".into(),
            media_type: "text/plain".into(),
            size: 120,
            content: "제1조 근로시간은 주 40시간으로 한다.\n제2조 연차 휴가는 법에 따른다.".into(),
        }
    }

    fn offline_config() -> Config {
        Config {
            jitter: false,
            openai_api_key: None,
            anthropic_api_key: None,
            // 접속할 수 없는 주소
            openai_base_url: "http://127.0.0.1:9".into(),
            anthropic_base_url: "http://127.0.0.1:9".into(),
            timeout_seconds: 2,
            ..Config::default()
        }
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&ScorerKind::Openai).unwrap(), "\"openai\"");
        let kind: ScorerKind = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(kind, ScorerKind::Anthropic);
        assert_eq!(kind.provider(), Some(Provider::Anthropic));
        assert_eq!(ScorerKind::Mock.provider(), None);
    }

    #[tokio::test]
    async fn test_heuristic_fills_meta() {
        let client = reqwest::Client::new();
        let report = analyze_with_fallback(ScorerKind::Heuristic, &offline_config(), &client, &document())
            .await
            .unwrap();
        assert_eq!(report.meta.file_name, "rules.txt");
        assert_eq!(report.meta.ai_mode, "키워드 분석");
        assert!(!report.meta.analysis_date.is_empty());
        assert_eq!(report.required_items[0].status, ItemStatus::Compliant);
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        let mut config = offline_config();
        config.openai_api_key = Some("sk-test".into());
        let client = reqwest::Client::new();

        let report = analyze_with_fallback(ScorerKind::Openai, &config, &client, &document())
            .await
            .unwrap();
        assert!(report.meta.ai_mode.contains("대체"));

        let scored = analyze_scored(ScorerKind::Openai, &config, &client, &document())
            .await
            .unwrap();
        assert_eq!(scored.scorer, ScorerKind::Heuristic);
        assert!(scored.fell_back(ScorerKind::Openai));
    }

    #[tokio::test]
    async fn test_no_fallback_surfaces_error() {
        let mut config = offline_config();
        config.fallback = false;
        let client = reqwest::Client::new();

        let result = analyze_with_fallback(ScorerKind::Anthropic, &config, &client, &document()).await;
        // 키가 환경 변수에 있으면 네트워크 오류, 없으면 키 누락
        assert!(matches!(
            result,
            Err(ReviewError::MissingApiKey(_)) | Err(ReviewError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_is_demo_report() {
        let client = reqwest::Client::new();
        let report = analyze_with_fallback(ScorerKind::Mock, &offline_config(), &client, &document())
            .await
            .unwrap();
        assert_eq!(report.compliance_score, 85);
        assert_eq!(report.meta.ai_mode, "데모 데이터");
    }
}
