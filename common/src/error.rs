//! 오류 타입 정의

use thiserror::Error;

/// 공통 오류 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// AI 응답에서 JSON을 꺼낼 수 없거나 파싱에 실패
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON은 읽었지만 보고서 스키마와 맞지 않음
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::intake::IntakeError),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeError;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_schema() {
        let error = Error::Schema("complianceScore가 범위를 벗어났습니다".to_string());
        assert_eq!(
            format!("{}", error),
            "Schema error: complianceScore가 범위를 벗어났습니다"
        );
    }

    #[test]
    fn test_error_from_intake() {
        let error: Error = IntakeError::TooShort { min: 50, actual: 3 }.into();
        assert!(matches!(error, Error::Validation(IntakeError::TooShort { .. })));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
