//! CSV / TSV 출력과 읽기
//!
//! 출력 규칙:
//! - UTF-8 BOM으로 시작 (Excel 한글 깨짐 방지)
//! - 구분자, 큰따옴표, CR, LF가 든 필드는 큰따옴표로 감싸고 `"`는 `""`로
//! - 행 구분은 CRLF
//!
//! parse_delimited는 같은 규칙으로 다시 읽는다.

use crate::error::{Error, Result};
use crate::types::AnalysisReport;

pub const BOM: char = '\u{FEFF}';

/// 표 머리글
pub const HEADER: [&str; 5] = ["구분", "항목", "상태/수준", "설명", "비고"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// 보고서를 행 목록으로 펼친다 (머리글 포함)
pub fn report_rows(report: &AnalysisReport) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let row = |cells: [&str; 5]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();

    rows.push(row(HEADER));

    let meta = &report.meta;
    let analyzed_at = format!("{} {}", meta.analysis_date, meta.analysis_time);
    let score = format!("{}점", report.compliance_score);
    rows.push(row(["기본정보", "파일명", "", &meta.file_name, &meta.file_size]));
    rows.push(row(["기본정보", "분석일시", "", analyzed_at.trim(), ""]));
    rows.push(row(["기본정보", "분석 모드", "", &meta.ai_mode, ""]));
    rows.push(row([
        "기본정보",
        "준수율",
        report.compliance_grade.label(),
        &score,
        report.risk_level.label(),
    ]));
    rows.push(row(["종합분석", "요약", report.risk_level.label(), &report.summary, ""]));

    for item in &report.required_items {
        let compliance = format!("{}%", item.compliance);
        rows.push(row([
            "필수항목",
            &item.item,
            item.status.label(),
            &item.description,
            &compliance,
        ]));
    }
    for factor in &report.risk_factors {
        rows.push(row([
            "위험요소",
            &factor.factor,
            factor.level.label(),
            &factor.description,
            &factor.recommendation,
        ]));
    }
    for rec in &report.recommendations {
        rows.push(row([
            "권고사항",
            &rec.item,
            rec.priority.label(),
            &rec.action,
            &rec.deadline,
        ]));
    }

    rows
}

/// 필드 하나를 인용 규칙에 맞춰 변환
pub fn escape_field(field: &str, delimiter: Delimiter) -> String {
    let needs_quote = field
        .chars()
        .any(|c| c == delimiter.as_char() || c == '"' || c == '\r' || c == '\n');
    if needs_quote {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 행 목록을 BOM 포함 문자열로
pub fn write_delimited(rows: &[Vec<String>], delimiter: Delimiter) -> String {
    let sep = delimiter.as_char().to_string();
    let mut out = String::new();
    out.push(BOM);
    for row in rows {
        let line = row
            .iter()
            .map(|f| escape_field(f, delimiter))
            .collect::<Vec<_>>()
            .join(&sep);
        out.push_str(&line);
        out.push_str("\r\n");
    }
    out
}

/// write_delimited 출력을 다시 행 목록으로 읽는다
///
/// 선행 BOM은 무시한다. 닫히지 않은 따옴표는 오류.
pub fn parse_delimited(input: &str, delimiter: Delimiter) -> Result<Vec<Vec<String>>> {
    let input = input.strip_prefix(BOM).unwrap_or(input);
    let sep = delimiter.as_char();

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            c if c == sep => row.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Parse("닫히지 않은 따옴표가 있습니다".into()));
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::demo_report;
    use crate::types::ReportMeta;
    use proptest::prelude::*;

    #[test]
    fn test_escape_rules() {
        assert_eq!(escape_field("plain", Delimiter::Comma), "plain");
        assert_eq!(escape_field("a,b", Delimiter::Comma), "\"a,b\"");
        assert_eq!(escape_field("a,b", Delimiter::Tab), "a,b");
        assert_eq!(escape_field("a\tb", Delimiter::Tab), "\"a\tb\"");
        assert_eq!(escape_field("say \"hi\"", Delimiter::Comma), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak", Delimiter::Comma), "\"line\nbreak\"");
    }

    #[test]
    fn test_report_rows_layout() {
        let report = demo_report(ReportMeta {
            file_name: "rules.txt".to_string(),
            ..Default::default()
        });
        let rows = report_rows(&report);
        assert_eq!(rows[0], HEADER.to_vec());
        assert!(rows.iter().all(|r| r.len() == HEADER.len()));

        let count = |section: &str| rows.iter().filter(|r| r[0] == section).count();
        assert_eq!(count("필수항목"), report.required_items.len());
        assert_eq!(count("위험요소"), report.risk_factors.len());
        assert_eq!(count("권고사항"), report.recommendations.len());
    }

    #[test]
    fn test_roundtrip_with_special_characters() {
        let mut report = demo_report(ReportMeta::default());
        report.summary = "쉼표, \"따옴표\"\n그리고 줄바꿈\t탭".to_string();
        report.required_items[0].description = "a,b\r\nc".to_string();

        let rows = report_rows(&report);
        for delimiter in [Delimiter::Comma, Delimiter::Tab] {
            let written = write_delimited(&rows, delimiter);
            assert!(written.starts_with(BOM));
            let parsed = parse_delimited(&written, delimiter).unwrap();
            assert_eq!(parsed, rows);
        }
    }

    #[test]
    fn test_parse_rejects_unclosed_quote() {
        assert!(parse_delimited("\"open,field", Delimiter::Comma).is_err());
    }

    #[test]
    fn test_parse_empty_fields() {
        let rows = parse_delimited("a,,c\r\n,,\r\n", Delimiter::Comma).unwrap();
        assert_eq!(rows, vec![vec!["a", "", "c"], vec!["", "", ""]]);
    }

    proptest! {
        #[test]
        fn prop_fields_survive_roundtrip(
            cells in proptest::collection::vec(
                proptest::collection::vec(".{0,12}", 1..5),
                1..6,
            )
        ) {
            for delimiter in [Delimiter::Comma, Delimiter::Tab] {
                let written = write_delimited(&cells, delimiter);
                let parsed = parse_delimited(&written, delimiter).unwrap();
                prop_assert_eq!(&parsed, &cells);
            }
        }
    }
}
