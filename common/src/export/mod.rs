//! 보고서 내보내기 (CLI, 서버, WASM 공용)
//!
//! 모든 렌더러는 보고서를 받아 바이트를 돌려주는 순수 함수다.
//! 파일 저장이나 브라우저 다운로드는 호출하는 쪽에서 처리한다.

pub mod delimited;
pub mod text;
pub mod word;

use crate::error::{Error, Result};
use crate::types::AnalysisReport;
use std::str::FromStr;

pub use delimited::{parse_delimited, report_rows, write_delimited, Delimiter};

/// 내보내기 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Word,
    Json,
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Csv,
        ExportFormat::Tsv,
        ExportFormat::Word,
        ExportFormat::Json,
        ExportFormat::Text,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Word => "doc",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Tsv => "text/tab-separated-values;charset=utf-8",
            ExportFormat::Word => "application/msword",
            ExportFormat::Json => "application/json",
            ExportFormat::Text => "text/plain;charset=utf-8",
        }
    }

    /// 버튼 라벨
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV (Excel)",
            ExportFormat::Tsv => "TSV (스프레드시트)",
            ExportFormat::Word => "Word",
            ExportFormat::Json => "JSON",
            ExportFormat::Text => "텍스트",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" | "excel" => Ok(ExportFormat::Csv),
            "tsv" | "sheets" => Ok(ExportFormat::Tsv),
            "word" | "doc" => Ok(ExportFormat::Word),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(Error::Config(format!("알 수 없는 내보내기 형식: {}", s))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// 보고서를 지정 형식의 바이트로 렌더링
pub fn render(report: &AnalysisReport, format: ExportFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Csv => write_delimited(&report_rows(report), Delimiter::Comma).into_bytes(),
        ExportFormat::Tsv => write_delimited(&report_rows(report), Delimiter::Tab).into_bytes(),
        ExportFormat::Word => word::render_html(report).into_bytes(),
        ExportFormat::Json => serde_json::to_vec_pretty(report)?,
        ExportFormat::Text => text::render_text(report).into_bytes(),
    };
    Ok(bytes)
}

/// 새 구글 시트 주소
pub const SHEETS_URL: &str = "https://sheets.google.com/create";

/// 스프레드시트에 붙여넣을 클립보드용 TSV (BOM 없음)
pub fn sheets_clipboard_text(report: &AnalysisReport) -> String {
    let tsv = write_delimited(&report_rows(report), Delimiter::Tab);
    tsv.trim_start_matches(delimited::BOM).to_string()
}

/// 원본 파일명에서 확장자를 뗀 부분
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// 내보낼 파일명: `취업규칙_분석결과_<stem>.<ext>`
pub fn export_file_name(source_file_name: &str, format: ExportFormat) -> String {
    let stem = file_stem(source_file_name);
    let stem = if stem.is_empty() { "document" } else { stem };
    format!("취업규칙_분석결과_{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::demo_report;
    use crate::types::ReportMeta;

    fn sample() -> AnalysisReport {
        demo_report(ReportMeta {
            file_name: "취업규칙.txt".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_sheets_clipboard_text() {
        let report = sample();
        let text = sheets_clipboard_text(&report);
        assert!(text.starts_with("구분\t항목\t상태/수준"));
        assert!(!text.contains(delimited::BOM));

        let rows = delimited::parse_delimited(&text, Delimiter::Tab).unwrap();
        assert_eq!(rows, report_rows(&report));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("doc".parse::<ExportFormat>().unwrap(), ExportFormat::Word);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("회사 규칙.v2.txt", ExportFormat::Csv),
            "취업규칙_분석결과_회사 규칙.v2.csv"
        );
        assert_eq!(export_file_name("rules", ExportFormat::Word), "취업규칙_분석결과_rules.doc");
        assert_eq!(export_file_name("", ExportFormat::Json), "취업규칙_분석결과_document.json");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_render_all_formats() {
        let report = sample();
        for format in ExportFormat::ALL {
            let bytes = render(&report, format).unwrap();
            assert!(!bytes.is_empty(), "{} 출력이 비어 있음", format);
        }
    }

    #[test]
    fn test_json_export_is_report() {
        let report = sample();
        let bytes = render(&report, ExportFormat::Json).unwrap();
        let back: AnalysisReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_csv_starts_with_bom() {
        let bytes = render(&sample(), ExportFormat::Csv).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }
}
