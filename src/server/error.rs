//! API 오류 응답

use crate::error::ReviewError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use policy_review_common::IntakeError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] IntakeError),

    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Review(ReviewError::Common(policy_review_common::Error::Validation(e))) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Review(e) if e.is_external() => {
                tracing::error!(category = e.category(), "외부 AI 오류: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("분석 중 오류가 발생했습니다 ({})", e.category()),
                )
            }
            ApiError::Review(e) => {
                tracing::error!("내부 오류: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "분석 중 오류가 발생했습니다".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
