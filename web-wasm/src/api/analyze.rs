//! 분석 요청
//!
//! - Browser: 공통 라이브러리의 키워드 분석을 브라우저 안에서 실행 (서버 불필요)
//! - 그 외: POST {server}/api/analyze (multipart: file, options)

use js_sys::{Array, Date, Uint8Array};
use policy_review_common::{analyze_text, AnalysisReport, Document, JitterSource, ReportMeta};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// 분석 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Browser,
    Heuristic,
    Mock,
    OpenAi,
    Anthropic,
}

impl Engine {
    pub const ALL: [Engine; 5] = [
        Engine::Browser,
        Engine::Heuristic,
        Engine::Mock,
        Engine::OpenAi,
        Engine::Anthropic,
    ];

    /// <select>의 value
    pub fn value(&self) -> &'static str {
        match self {
            Engine::Browser => "browser",
            Engine::Heuristic => "heuristic",
            Engine::Mock => "mock",
            Engine::OpenAi => "openai",
            Engine::Anthropic => "anthropic",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.value() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Engine::Browser => "키워드 분석 (브라우저)",
            Engine::Heuristic => "키워드 분석 (서버)",
            Engine::Mock => "데모 데이터 (서버)",
            Engine::OpenAi => "OpenAI GPT (서버)",
            Engine::Anthropic => "Anthropic Claude (서버)",
        }
    }

    /// 서버에 넘길 scorer 이름. 브라우저 분석이면 None.
    pub fn server_scorer(&self) -> Option<&'static str> {
        match self {
            Engine::Browser => None,
            other => Some(other.value()),
        }
    }

    pub fn uses_api_key(&self) -> bool {
        matches!(self, Engine::OpenAi | Engine::Anthropic)
    }
}

/// Math.random 기반 지터
struct BrowserJitter;

impl JitterSource for BrowserJitter {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// 서버 오류 응답 `{"error": "..."}`
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn pad2(value: u32) -> String {
    format!("{:02}", value)
}

/// 브라우저 시각으로 찍은 메타데이터
fn browser_meta(document: &Document, ai_mode: &str) -> ReportMeta {
    let now = Date::new_0();
    ReportMeta::for_document(document, ai_mode).with_timestamp(
        format!("{}. {}. {}.", now.get_full_year(), now.get_month() + 1, now.get_date()),
        format!(
            "{}:{}:{}",
            pad2(now.get_hours()),
            pad2(now.get_minutes()),
            pad2(now.get_seconds())
        ),
    )
}

/// 분석 실행. 실패하면 화면에 보여줄 메시지를 돌려준다.
///
/// `upload`는 사용자가 고른 파일의 원본 바이트. 서버 분석에서는 디코딩한
/// 본문 대신 이것을 그대로 올린다.
pub async fn analyze(
    engine: Engine,
    server_url: &str,
    document: &Document,
    upload: Option<&[u8]>,
    api_key: Option<&str>,
) -> Result<AnalysisReport, String> {
    match engine.server_scorer() {
        None => Ok(analyze_text(
            &document.content,
            &mut BrowserJitter,
            browser_meta(document, engine.label()),
        )),
        Some(scorer) => {
            let key = api_key.filter(|_| engine.uses_api_key());
            post_analyze(server_url, scorer, document, upload_payload(document, upload), key)
                .await
                .map_err(|e| e.as_string().unwrap_or_else(|| format!("요청 실패: {:?}", e)))
        }
    }
}

/// 원본 바이트가 없으면 본문을 UTF-8로 올린다
fn upload_payload<'a>(document: &'a Document, upload: Option<&'a [u8]>) -> &'a [u8] {
    upload.unwrap_or(document.content.as_bytes())
}

fn analyze_url(server_url: &str) -> String {
    format!("{}/api/analyze", server_url.trim().trim_end_matches('/'))
}

fn options_json(scorer: &str, api_key: Option<&str>) -> String {
    let mut options = serde_json::json!({ "scorer": scorer });
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        options["apiKey"] = serde_json::Value::String(key.to_string());
    }
    options.to_string()
}

async fn post_analyze(
    server_url: &str,
    scorer: &str,
    document: &Document,
    payload: &[u8],
    api_key: Option<&str>,
) -> Result<AnalysisReport, JsValue> {
    let parts = Array::of1(&Uint8Array::from(payload));
    let bag = BlobPropertyBag::new();
    bag.set_type(&document.media_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, &document.file_name)?;
    form.append_with_str("options", &options_json(scorer, api_key))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&analyze_url(server_url), &opts)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window 없음"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("분석 중 오류가 발생했습니다 (HTTP {})", resp.status()));
        return Err(JsValue::from_str(&message));
    }

    serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&format!("응답 형식 오류: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_values_roundtrip() {
        for engine in Engine::ALL {
            assert_eq!(Engine::from_value(engine.value()), Some(engine));
        }
        assert_eq!(Engine::from_value("llama"), None);
        assert_eq!(Engine::Browser.server_scorer(), None);
        assert_eq!(Engine::Anthropic.server_scorer(), Some("anthropic"));
    }

    #[test]
    fn test_upload_payload_prefers_original_bytes() {
        let document = Document {
            file_name: "rules.doc".into(),
            content: "근로시간\u{FFFD}".into(),
            ..Default::default()
        };
        let original = [0xEC, 0xA7, 0x80, 0xFF];
        assert_eq!(upload_payload(&document, Some(&original)), &original[..]);
        assert_eq!(upload_payload(&document, None), document.content.as_bytes());
    }

    #[test]
    fn test_analyze_url() {
        assert_eq!(analyze_url(""), "/api/analyze");
        assert_eq!(analyze_url("http://localhost:3000/"), "http://localhost:3000/api/analyze");
    }

    #[test]
    fn test_options_json_skips_blank_key() {
        assert_eq!(options_json("mock", Some("  ")), r#"{"scorer":"mock"}"#);
        let json: serde_json::Value = serde_json::from_str(&options_json("openai", Some("sk-1"))).unwrap();
        assert_eq!(json["apiKey"], "sk-1");
    }
}
