//! 일반 텍스트 보고서 (메모장, 메일 본문 붙여넣기용)

use crate::types::AnalysisReport;

pub fn render_text(report: &AnalysisReport) -> String {
    let meta = &report.meta;
    let mut out = String::new();

    out.push_str("취업규칙 분석 결과\n\n");
    out.push_str(&format!("파일명: {}\n", meta.file_name));
    out.push_str(&format!(
        "분석일시: {} {}\n",
        meta.analysis_date, meta.analysis_time
    ));
    out.push_str(&format!(
        "위험도: {}\n준수율: {}점 ({})\n",
        report.risk_level,
        report.compliance_score,
        report.compliance_grade
    ));
    if !meta.ai_mode.is_empty() {
        out.push_str(&format!("분석 모드: {}\n", meta.ai_mode));
    }

    out.push_str("\n=== 종합 분석 ===\n");
    out.push_str(&report.summary);
    out.push('\n');

    out.push_str("\n=== 필수 기재사항 ===\n");
    let items: Vec<String> = report
        .required_items
        .iter()
        .map(|item| format!("• {}: {}\n  {}", item.item, item.status, item.description))
        .collect();
    out.push_str(&items.join("\n\n"));
    out.push('\n');

    out.push_str("\n=== 위험 요소 ===\n");
    let factors: Vec<String> = report
        .risk_factors
        .iter()
        .map(|f| {
            format!(
                "• {} ({})\n  {}\n  개선방안: {}",
                f.factor, f.level, f.description, f.recommendation
            )
        })
        .collect();
    out.push_str(&factors.join("\n\n"));
    out.push('\n');

    out.push_str("\n=== 개선 권고사항 ===\n");
    let recs: Vec<String> = report
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({})\n   {} [{}]", i + 1, r.item, r.priority, r.action, r.deadline))
        .collect();
    out.push_str(&recs.join("\n\n"));
    out.push('\n');

    if !meta.note.is_empty() {
        out.push_str("\n=== 참고사항 ===\n");
        out.push_str(&meta.note);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::demo_report;
    use crate::types::ReportMeta;

    #[test]
    fn test_sections_present() {
        let text = render_text(&demo_report(ReportMeta {
            file_name: "rules.txt".to_string(),
            ai_mode: "키워드 분석".to_string(),
            ..Default::default()
        }));
        assert!(text.contains("파일명: rules.txt"));
        assert!(text.contains("분석 모드: 키워드 분석"));
        assert!(text.contains("=== 위험 요소 ==="));
        assert!(text.contains("1. 해고 사유 명시 (높음)"));
        assert!(!text.contains("참고사항"));
    }
}
