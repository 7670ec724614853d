use super::{Scorer, ScorerKind};
use crate::config::Config;
use crate::error::Result;
use policy_review_common::scoring::{JitterSource, NoJitter};
use policy_review_common::{analyze_text, AnalysisReport, Document, ReportMeta};
use rand::Rng;

/// rand 기반 지터
pub struct RandomJitter<R>(pub R);

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// 키워드 분석
#[derive(Debug, Clone, Copy)]
pub struct HeuristicScorer {
    jitter: bool,
}

impl HeuristicScorer {
    pub fn new(jitter: bool) -> Self {
        Self { jitter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jitter)
    }

    pub fn analyze(&self, document: &Document, meta: ReportMeta) -> AnalysisReport {
        if self.jitter {
            analyze_text(
                &document.content,
                &mut RandomJitter(rand::thread_rng()),
                meta,
            )
        } else {
            analyze_text(&document.content, &mut NoJitter, meta)
        }
    }
}

impl Scorer for HeuristicScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Heuristic
    }

    async fn score(&self, document: &Document, meta: ReportMeta) -> Result<AnalysisReport> {
        tracing::debug!(file = %document.file_name, jitter = self.jitter, "키워드 분석");
        Ok(self.analyze(document, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn document(content: &str) -> Document {
        Document {
            file_name: "rules.txt".into(),
            content: content.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_random_jitter_in_unit_range() {
        let mut jitter = RandomJitter(StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            let v = jitter.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_without_jitter_is_deterministic() {
        let scorer = HeuristicScorer::new(false);
        let doc = document("근로시간 휴게시간 연차 임금");
        let a = scorer.analyze(&doc, ReportMeta::default());
        let b = scorer.analyze(&doc, ReportMeta::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_jitter_keeps_scores_in_range() {
        let scorer = HeuristicScorer::new(true);
        let doc = document("근로시간 40시간 업무시간 주휴일 휴게시간");
        for _ in 0..50 {
            let report = scorer.analyze(&doc, ReportMeta::default());
            assert!(report.compliance_score <= 100);
            for item in &report.required_items {
                assert!(item.compliance <= 100);
            }
        }
    }
}
