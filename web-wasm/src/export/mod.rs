pub mod download;

use policy_review_common::export::{
    export_file_name, render, sheets_clipboard_text, ExportFormat, SHEETS_URL,
};
use policy_review_common::AnalysisReport;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// 보고서를 지정 형식으로 변환해 내려받는다
pub fn download_report(report: &AnalysisReport, format: ExportFormat) -> Result<(), String> {
    let bytes = render(report, format).map_err(|e| format!("{} 변환 실패: {}", format.label(), e))?;
    let file_name = export_file_name(&report.meta.file_name, format);
    download::save_bytes(&bytes, &file_name, format.mime_type())
        .map_err(|e| format!("다운로드 실패: {:?}", e))
}

/// 구글 시트로 보내기 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsExport {
    /// 클립보드에 복사됨
    Copied,
    /// 복사 실패로 TSV 파일을 내려받음
    Downloaded,
}

impl SheetsExport {
    pub fn message(&self) -> &'static str {
        match self {
            SheetsExport::Copied => {
                "클립보드에 복사했습니다. 새 시트의 A1 셀을 누르고 붙여넣기(Ctrl+V) 하세요."
            }
            SheetsExport::Downloaded => {
                "클립보드 복사에 실패해 TSV 파일을 내려받았습니다. 시트에서 '파일 > 가져오기'로 올리세요."
            }
        }
    }
}

async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window 없음"))?;
    JsFuture::from(window.navigator().clipboard().write_text(text)).await?;
    Ok(())
}

/// TSV를 클립보드에 복사하고 새 구글 시트를 연다. 복사가 안 되면 TSV를 내려받는다.
pub async fn export_to_sheets(report: &AnalysisReport) -> Result<SheetsExport, String> {
    let outcome = match copy_to_clipboard(&sheets_clipboard_text(report)).await {
        Ok(()) => SheetsExport::Copied,
        Err(e) => {
            web_sys::console::warn_1(&format!("클립보드 복사 실패: {:?}", e).into());
            download_report(report, ExportFormat::Tsv)?;
            SheetsExport::Downloaded
        }
    };

    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(SHEETS_URL, "_blank") {
            web_sys::console::warn_1(&format!("시트 열기 실패: {:?}", e).into());
        }
    }
    Ok(outcome)
}
