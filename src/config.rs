use crate::error::{Result, ReviewError};
use crate::scorer::{Provider, ScorerKind};
use policy_review_common::intake::DEFAULT_MIN_CONTENT_CHARS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 기본 분석 방식
    pub scorer: ScorerKind,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_model: String,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    /// 본문 최소 글자 수
    pub min_content_chars: usize,
    pub timeout_seconds: u64,
    /// AI 호출 실패 시 키워드 분석으로 대체
    pub fallback: bool,
    /// 키워드 점수에 난수 가산 (끄면 같은 문서는 항상 같은 점수)
    pub jitter: bool,
    /// 서버 바인드 주소
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 설정 디렉터리 (~/.config/policy-review)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReviewError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("policy-review"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            scorer: ScorerKind::Heuristic,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: "gpt-4o-mini".into(),
            anthropic_model: "claude-sonnet-4-20250514".into(),
            openai_base_url: OPENAI_BASE_URL.into(),
            anthropic_base_url: ANTHROPIC_BASE_URL.into(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            timeout_seconds: 60,
            fallback: true,
            jitter: true,
            bind: "127.0.0.1:3000".into(),
        }
    }

    /// API 키 (환경 변수 우선)
    pub fn get_api_key(&self, provider: Provider) -> Result<String> {
        if let Ok(key) = std::env::var(provider.env_var()) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        let stored = match provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Anthropic => &self.anthropic_api_key,
        };
        stored
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ReviewError::MissingApiKey(provider.env_var()))
    }

    pub fn set_api_key(&mut self, provider: Provider, key: String) {
        match provider {
            Provider::OpenAi => self.openai_api_key = Some(key),
            Provider::Anthropic => self.anthropic_api_key = Some(key),
        }
    }

    pub fn model(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_model,
            Provider::Anthropic => &self.anthropic_model,
        }
    }

    pub fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_base_url,
            Provider::Anthropic => &self.anthropic_base_url,
        }
    }
}
