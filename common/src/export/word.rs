//! Word 호환 HTML 문서 생성
//!
//! Word가 `.doc`로 열 수 있는 단일 HTML 파일. 스타일은 인라인 CSS.

use crate::types::AnalysisReport;

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"body { font-family: 'Malgun Gothic', sans-serif; margin: 24px; color: #222; }
h1 { font-size: 20pt; border-bottom: 2px solid #333; padding-bottom: 6px; }
h2 { font-size: 14pt; margin-top: 24px; }
table { width: 100%; border-collapse: collapse; margin-top: 8px; }
th, td { border: 1px solid #999; padding: 6px 8px; font-size: 10pt; vertical-align: top; }
th { background: #f0f0f0; }
.meta td:first-child { width: 120px; background: #fafafa; font-weight: bold; }
.status-pass { color: #15803d; font-weight: bold; }
.status-improve { color: #b45309; font-weight: bold; }
.level-low { color: #15803d; }
.level-medium { color: #b45309; }
.level-high { color: #b91c1c; font-weight: bold; }
.note { margin-top: 24px; font-size: 9pt; color: #666; }"#;

/// 보고서를 HTML 문자열로
pub fn render_html(report: &AnalysisReport) -> String {
    let meta = &report.meta;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>취업규칙 분석 결과 - {}</title>\n",
        escape_html(&meta.file_name)
    ));
    html.push_str(&format!("<style>\n{}\n</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>취업규칙 분석 결과</h1>\n");

    html.push_str("<table class=\"meta\">\n");
    let meta_rows = [
        ("파일명", format!("{} ({})", meta.file_name, meta.file_size)),
        (
            "분석일시",
            format!("{} {}", meta.analysis_date, meta.analysis_time)
                .trim()
                .to_string(),
        ),
        ("분석 모드", meta.ai_mode.clone()),
        (
            "준수율",
            format!(
                "{}점 ({}등급)",
                report.compliance_score,
                report.compliance_grade.label()
            ),
        ),
    ];
    for (label, value) in meta_rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            label,
            escape_html(&value)
        ));
    }
    html.push_str(&format!(
        "<tr><td>위험도</td><td class=\"level-{}\">{}</td></tr>\n</table>\n",
        report.risk_level.css_suffix(),
        report.risk_level.label()
    ));

    html.push_str("<h2>종합 분석</h2>\n");
    html.push_str(&format!("<p>{}</p>\n", escape_html(&report.summary)));

    html.push_str("<h2>필수 기재사항</h2>\n<table>\n");
    html.push_str("<tr><th>항목</th><th>상태</th><th>준수율</th><th>설명</th></tr>\n");
    for item in &report.required_items {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}%</td><td>{}</td></tr>\n",
            escape_html(&item.item),
            item.status.css_class(),
            item.status.label(),
            item.compliance,
            escape_html(&item.description)
        ));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>위험 요소</h2>\n<table>\n");
    html.push_str("<tr><th>요소</th><th>수준</th><th>설명</th><th>개선방안</th></tr>\n");
    for factor in &report.risk_factors {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"level-{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&factor.factor),
            factor.level.css_suffix(),
            factor.level.label(),
            escape_html(&factor.description),
            escape_html(&factor.recommendation)
        ));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>개선 권고사항</h2>\n<table>\n");
    html.push_str("<tr><th>#</th><th>항목</th><th>우선순위</th><th>조치사항</th><th>기한</th></tr>\n");
    for (index, rec) in report.recommendations.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"level-{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
            index + 1,
            escape_html(&rec.item),
            rec.priority.css_suffix(),
            rec.priority.label(),
            escape_html(&rec.action),
            escape_html(&rec.deadline)
        ));
    }
    html.push_str("</table>\n");

    if !meta.note.is_empty() {
        html.push_str(&format!("<p class=\"note\">{}</p>\n", escape_html(&meta.note)));
    }

    html.push_str("</body>\n</html>\n");
    html
}
