//! HTTP 핸들러

use super::error::ApiError;
use super::AppState;
use crate::config::Config;
use crate::scorer::{self, ScorerKind};
use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use policy_review_common::export::{export_file_name, render, ExportFormat};
use policy_review_common::{intake, AnalysisReport, IntakeError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

pub async fn health() -> &'static str {
    "OK"
}

/// multipart `options` 필드
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    pub scorer: Option<ScorerKind>,
    /// 브라우저에 저장된 API 키. 서버에 키가 없을 때만 쓴다.
    pub api_key: Option<String>,
}

/// 요청에 쓸 설정: 서버 키가 없고 요청에 키가 있으면 그 키를 넣은 복사본
pub fn effective_config<'a>(
    config: &'a Config,
    kind: ScorerKind,
    api_key: Option<&str>,
) -> Cow<'a, Config> {
    let key = api_key.map(str::trim).filter(|k| !k.is_empty());
    match (kind.provider(), key) {
        (Some(provider), Some(key)) if config.get_api_key(provider).is_err() => {
            let mut config = config.clone();
            config.set_api_key(provider, key.to_string());
            Cow::Owned(config)
        }
        _ => Cow::Borrowed(config),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

struct UploadedFile {
    name: String,
    media_type: String,
    bytes: Bytes,
}

/// POST /api/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload: Option<UploadedFile> = None;
    let mut options = AnalyzeOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("multipart 읽기 실패: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("파일 읽기 실패: {}", e)))?;
                upload = Some(UploadedFile {
                    name,
                    media_type,
                    bytes,
                });
            }
            Some("options") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("options 읽기 실패: {}", e)))?;
                if !text.trim().is_empty() {
                    options = serde_json::from_str(&text)
                        .map_err(|e| ApiError::BadRequest(format!("options 형식 오류: {}", e)))?;
                }
            }
            _ => {}
        }
    }

    let upload = upload.ok_or(IntakeError::MissingFile)?;
    let document = intake::accept(
        &upload.name,
        &upload.media_type,
        &upload.bytes,
        state.config.min_content_chars,
    )?;

    let kind = options.scorer.unwrap_or(state.config.scorer);
    let fingerprint = document.fingerprint();
    tracing::info!(
        file = %document.file_name,
        size = document.size,
        fingerprint = %&fingerprint[..12],
        scorer = %kind,
        "분석 요청"
    );

    let config = effective_config(&state.config, kind, options.api_key.as_deref());
    let report = scorer::analyze_with_fallback(kind, &config, &state.client, &document).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        report,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
}

/// POST /api/export?format=csv|tsv|word|json|text
pub async fn export(
    Query(query): Query<ExportQuery>,
    Json(report): Json<AnalysisReport>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = query
        .format
        .parse()
        .map_err(|e: policy_review_common::Error| ApiError::BadRequest(e.to_string()))?;

    let bytes = render(&report, format).map_err(crate::error::ReviewError::from)?;
    let file_name = export_file_name(&report.meta.file_name, format);

    let disposition = content_disposition(&file_name);
    let mut response = bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(format.mime_type()));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

/// 한글 파일명용 Content-Disposition (RFC 5987)
pub fn content_disposition(file_name: &str) -> String {
    let ascii_fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || ".-_".contains(c) { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback,
        percent_encode(file_name)
    )
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
