use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("API 키가 설정되지 않았습니다 ({0}). `policy-review config --set-api-key KEY` 또는 환경 변수로 설정하세요")]
    MissingApiKey(&'static str),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("분석할 문서가 없습니다: {0}")]
    NoDocumentsFound(String),

    #[error("네트워크 오류: {0}")]
    Network(String),

    #[error("API 호출 오류 (HTTP {status}): {message}")]
    ApiCall { status: u16, message: String },

    #[error("API 응답 해석 실패: {0}")]
    ApiParse(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] policy_review_common::Error),
}

impl ReviewError {
    /// 외부 AI 호출 단계의 실패인지 (대체 분석 대상)
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ReviewError::MissingApiKey(_)
                | ReviewError::Network(_)
                | ReviewError::ApiCall { .. }
                | ReviewError::ApiParse(_)
                | ReviewError::Common(policy_review_common::Error::Parse(_))
                | ReviewError::Common(policy_review_common::Error::Schema(_))
        )
    }

    /// 화면에 보여줄 분류명
    pub fn category(&self) -> &'static str {
        match self {
            ReviewError::MissingApiKey(_) => "인증 정보 없음",
            ReviewError::Network(_) => "네트워크",
            ReviewError::ApiCall { .. } => "외부 API 응답 오류",
            ReviewError::ApiParse(_)
            | ReviewError::Common(policy_review_common::Error::Parse(_))
            | ReviewError::Common(policy_review_common::Error::Schema(_)) => "응답 해석",
            ReviewError::Common(policy_review_common::Error::Validation(_)) => "입력 검증",
            _ => "내부 오류",
        }
    }
}

impl From<reqwest::Error> for ReviewError {
    fn from(e: reqwest::Error) -> Self {
        ReviewError::Network(e.to_string())
    }
}

impl From<policy_review_common::IntakeError> for ReviewError {
    fn from(e: policy_review_common::IntakeError) -> Self {
        ReviewError::Common(e.into())
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
