//! 보고서 조립
//!
//! 카테고리 점수와 본문으로부터 필수 항목 / 위험 요소 / 권고사항을 만든다.
//! 종합 점수는 필수 항목 5개 카테고리 점수의 평균이다.

use crate::checklist::{REQUIRED_ITEMS, RISK_CHECKS};
use crate::scoring::{self, JitterSource};
use crate::types::{
    AnalysisReport, CategoryScore, Grade, ItemStatus, Level, Recommendation, ReportMeta,
    RequiredItem, RiskFactor,
};

/// 이 점수 미만이면 우선순위 높음
const URGENT_BELOW: u8 = 60;

/// 권고사항이 이 개수보다 적으면 정기 검토 항목을 덧붙인다
const MIN_RECOMMENDATIONS: usize = 2;

/// 키워드 분석 후 보고서 생성
pub fn analyze_text(text: &str, jitter: &mut dyn JitterSource, meta: ReportMeta) -> AnalysisReport {
    let scores = scoring::score_categories(text, jitter);
    assemble_report(text, &scores, meta)
}

/// 점수 목록으로 보고서 조립
pub fn assemble_report(text: &str, scores: &[CategoryScore], meta: ReportMeta) -> AnalysisReport {
    let score_of = |key: &str| {
        scores
            .iter()
            .find(|s| s.category == key)
            .map(|s| s.score)
            .unwrap_or(0)
    };

    let required_items: Vec<RequiredItem> = REQUIRED_ITEMS
        .iter()
        .map(|rule| {
            let covered = rule.category.is_covered(text);
            RequiredItem {
                item: rule.item.to_string(),
                status: if covered {
                    ItemStatus::Compliant
                } else {
                    ItemStatus::NeedsImprovement
                },
                description: if covered {
                    rule.compliant_description
                } else {
                    rule.missing_description
                }
                .to_string(),
                compliance: score_of(rule.category.key),
            }
        })
        .collect();

    let risk_factors = RISK_CHECKS
        .iter()
        .map(|rule| {
            let present = rule.category.is_covered(text);
            RiskFactor {
                factor: rule.factor.to_string(),
                level: if present { Level::Low } else { Level::Medium },
                description: if present {
                    rule.present_description
                } else {
                    rule.missing_description
                }
                .to_string(),
                recommendation: if present {
                    rule.present_recommendation
                } else {
                    rule.missing_recommendation
                }
                .to_string(),
            }
        })
        .collect();

    let recommendations = build_recommendations(&required_items);

    let required_keys: Vec<&str> = REQUIRED_ITEMS.iter().map(|r| r.category.key).collect();
    let compliance_score = scoring::overall_score(
        scores
            .iter()
            .filter(|s| required_keys.contains(&s.category.as_str())),
    );

    let summary = build_summary(text, &required_items, compliance_score);

    AnalysisReport {
        meta,
        risk_level: scoring::risk_level(compliance_score),
        summary,
        compliance_score,
        compliance_grade: scoring::grade(compliance_score),
        required_items,
        risk_factors,
        recommendations,
    }
}

fn build_recommendations(items: &[RequiredItem]) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = items
        .iter()
        .filter(|item| item.status == ItemStatus::NeedsImprovement)
        .map(|item| {
            let urgent = item.compliance < URGENT_BELOW;
            Recommendation {
                priority: if urgent { Level::High } else { Level::Medium },
                item: item.item.clone(),
                action: format!(
                    "{}에 대한 구체적인 기준과 절차를 명문화하여 규정에 추가",
                    item.item
                ),
                deadline: if urgent { "1개월 이내" } else { "3개월 이내" }.to_string(),
            }
        })
        .collect();

    if recommendations.len() < MIN_RECOMMENDATIONS {
        recommendations.push(Recommendation {
            priority: Level::Low,
            item: "정기 검토 체계 구축".to_string(),
            action: "법령 개정에 따른 정기적인 취업규칙 검토 체계 마련".to_string(),
            deadline: "6개월 이내".to_string(),
        });
    }

    recommendations
}

fn build_summary(text: &str, items: &[RequiredItem], score: u8) -> String {
    let clauses = text.lines().filter(|line| !line.trim().is_empty()).count();
    let compliant = items
        .iter()
        .filter(|i| i.status == ItemStatus::Compliant)
        .count();
    let missing = items.len() - compliant;
    let band = if score >= 80 {
        "양호한"
    } else if score >= 70 {
        "보통"
    } else {
        "미흡한"
    };

    format!(
        "파일 분석 결과 총 {}개 조항을 검토했습니다. {}개 항목이 법령을 준수하고 있으며, {}개 항목에서 개선이 필요합니다. 전반적으로 {} 수준의 법적 준수 상태를 보입니다.",
        clauses, compliant, missing, band
    )
}

/// 데모용 고정 보고서 (화면 개발, 목업 모드)
pub fn demo_report(meta: ReportMeta) -> AnalysisReport {
    let compliance_score = 85;
    AnalysisReport {
        meta,
        risk_level: Level::Medium,
        summary: "취업규칙 검토가 완료되었습니다. 전반적으로 법적 요구사항을 충족하고 있으나, 일부 개선이 필요한 부분이 발견되었습니다.".to_string(),
        compliance_score,
        compliance_grade: Grade::from_score(compliance_score),
        required_items: vec![
            RequiredItem {
                item: "근로시간 및 휴게시간".to_string(),
                status: ItemStatus::Compliant,
                description: "주 40시간 근무제 및 휴게시간이 적절히 명시되어 있습니다.".to_string(),
                compliance: 95,
            },
            RequiredItem {
                item: "연차휴가 규정".to_string(),
                status: ItemStatus::NeedsImprovement,
                description: "연차휴가 부여 기준이 불명확합니다.".to_string(),
                compliance: 75,
            },
            RequiredItem {
                item: "임금 지급 규정".to_string(),
                status: ItemStatus::Compliant,
                description: "최저임금 준수 및 임금 지급일이 명확히 규정되어 있습니다.".to_string(),
                compliance: 90,
            },
        ],
        risk_factors: vec![
            RiskFactor {
                factor: "징계 절차".to_string(),
                level: Level::Medium,
                description: "징계 절차에서 근로자 의견 청취 과정이 미흡합니다.".to_string(),
                recommendation: "징계위원회 구성 및 의견 청취 절차를 명문화하세요.".to_string(),
            },
            RiskFactor {
                factor: "해고 사유".to_string(),
                level: Level::High,
                description: "정당한 해고 사유가 구체적으로 명시되지 않았습니다.".to_string(),
                recommendation: "객관적이고 합리적인 해고 사유를 구체적으로 규정하세요.".to_string(),
            },
        ],
        recommendations: vec![
            Recommendation {
                priority: Level::High,
                item: "해고 사유 명시".to_string(),
                action: "정당한 해고 사유를 구체적으로 명문화".to_string(),
                deadline: "1개월 내".to_string(),
            },
            Recommendation {
                priority: Level::Medium,
                item: "연차휴가 규정 보완".to_string(),
                action: "연차휴가 부여 기준 및 절차 상세 기술".to_string(),
                deadline: "2개월 내".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{FixedJitter, NoJitter};

    const PADDING: &str = "\n본 규칙은 회사의 모든 직원에게 적용되며 세부 사항은 별도 내규로 정한다.";

    fn scenario_text() -> String {
        format!("제1조 근로시간은 주 40시간으로 한다.\n제2조 연차 휴가는 법에 따른다.{}", PADDING)
    }

    #[test]
    fn test_scenario_statuses() {
        let report = analyze_text(&scenario_text(), &mut NoJitter, ReportMeta::default());

        let status = |name: &str| {
            report
                .required_items
                .iter()
                .find(|i| i.item == name)
                .map(|i| i.status)
                .unwrap()
        };
        assert_eq!(status("근로시간 규정"), ItemStatus::Compliant);
        assert_eq!(status("연차휴가 규정"), ItemStatus::Compliant);
        assert_eq!(status("휴게시간 규정"), ItemStatus::NeedsImprovement);
        assert_eq!(status("임금 지급 규정"), ItemStatus::NeedsImprovement);
        assert_eq!(status("퇴직급여 규정"), ItemStatus::NeedsImprovement);
    }

    #[test]
    fn test_scenario_overall_is_mean_of_five() {
        let report = analyze_text(&scenario_text(), &mut NoJitter, ReportMeta::default());
        let sum: u32 = report.required_items.iter().map(|i| i.compliance as u32).sum();
        let expected = (sum as f64 / 5.0).round() as u8;
        assert_eq!(report.compliance_score, expected);
        assert_eq!(report.compliance_score, 20);
        assert_eq!(report.compliance_grade, Grade::D);
        assert_eq!(report.risk_level, Level::High);
    }

    #[test]
    fn test_recommendations_for_missing_items() {
        let report = analyze_text(&scenario_text(), &mut NoJitter, ReportMeta::default());
        assert_eq!(report.recommendations.len(), 3);
        for rec in &report.recommendations {
            assert_eq!(rec.priority, Level::High);
            assert_eq!(rec.deadline, "1개월 이내");
        }
    }

    #[test]
    fn test_periodic_review_added_when_few_recommendations() {
        let text = "근로시간 휴게시간 연차 임금 퇴직 징계 연장근로 모두 규정한다.";
        let report = analyze_text(text, &mut NoJitter, ReportMeta::default());
        assert_eq!(report.needs_improvement_count(), 0);
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].item, "정기 검토 체계 구축");
        assert_eq!(report.recommendations[0].priority, Level::Low);
    }

    #[test]
    fn test_risk_factors_follow_keywords() {
        let report = analyze_text("징계위원회를 둔다", &mut NoJitter, ReportMeta::default());
        assert_eq!(report.risk_factors.len(), 2);
        assert_eq!(report.risk_factors[0].level, Level::Low);
        assert_eq!(report.risk_factors[1].level, Level::Medium);
    }

    #[test]
    fn test_scores_and_grade_in_range_with_jitter() {
        let report = analyze_text(&scenario_text(), &mut FixedJitter(0.99), ReportMeta::default());
        assert!(report.compliance_score <= 100);
        assert_eq!(report.compliance_grade, Grade::from_score(report.compliance_score));
        for item in &report.required_items {
            if item.status == ItemStatus::NeedsImprovement {
                assert!(item.compliance <= 20);
            }
        }
    }

    #[test]
    fn test_summary_counts() {
        let report = analyze_text(&scenario_text(), &mut NoJitter, ReportMeta::default());
        assert!(report.summary.contains("총 3개 조항"));
        assert!(report.summary.contains("2개 항목이 법령을 준수"));
        assert!(report.summary.contains("미흡한"));
    }

    #[test]
    fn test_meta_is_carried() {
        let meta = ReportMeta {
            file_name: "rules.txt".to_string(),
            ai_mode: "키워드 분석".to_string(),
            ..Default::default()
        };
        let report = analyze_text(&scenario_text(), &mut NoJitter, meta.clone());
        assert_eq!(report.meta, meta);
    }

    #[test]
    fn test_demo_report_is_consistent() {
        let report = demo_report(ReportMeta::default());
        assert_eq!(report.compliance_grade, Grade::from_score(report.compliance_score));
        assert!(!report.required_items.is_empty());
    }
}
