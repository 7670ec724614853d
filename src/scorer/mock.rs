use super::{Scorer, ScorerKind};
use crate::error::Result;
use policy_review_common::{demo_report, AnalysisReport, Document, ReportMeta};

/// 고정 데모 보고서 (화면 개발용)
#[derive(Debug, Clone, Copy, Default)]
pub struct MockScorer;

impl Scorer for MockScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Mock
    }

    async fn score(&self, _document: &Document, meta: ReportMeta) -> Result<AnalysisReport> {
        Ok(demo_report(meta))
    }
}
