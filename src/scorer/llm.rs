//! 외부 AI API 연동
//!
//! - OpenAI: POST {base}/v1/chat/completions, `Authorization: Bearer`
//! - Anthropic: POST {base}/v1/messages, `x-api-key` + `anthropic-version`
//!
//! 응답 본문의 텍스트를 꺼낸 뒤 parse_report_response로 검증한다.

use super::{Scorer, ScorerKind};
use crate::config::Config;
use crate::error::{Result, ReviewError};
use policy_review_common::prompts::{build_analysis_prompt, SYSTEM_PROMPT};
use policy_review_common::{parse_report_response, AnalysisReport, Document, ReportMeta};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f32 = 0.2;
/// 오류 메시지에 넣는 응답 본문 최대 길이
const ERROR_BODY_CHARS: usize = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn endpoint(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Provider::OpenAi => format!("{}/v1/chat/completions", base),
            Provider::Anthropic => format!("{}/v1/messages", base),
        }
    }
}

/// OpenAI 요청
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI 응답
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Anthropic 요청
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

/// Anthropic 응답
#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

pub struct LlmScorer {
    provider: Provider,
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl LlmScorer {
    pub fn from_config(provider: Provider, config: &Config, client: reqwest::Client) -> Result<Self> {
        let api_key = config.get_api_key(provider)?;
        Ok(Self {
            provider,
            client,
            api_key,
            model: config.model(provider).to_string(),
            endpoint: provider.endpoint(config.base_url(provider)),
            timeout: Duration::from_secs(config.timeout_seconds.max(1)),
        })
    }

    /// 프롬프트를 보내고 모델의 답변 텍스트를 받는다
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = match self.provider {
            Provider::OpenAi => self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&ChatRequest {
                    model: &self.model,
                    messages: vec![
                        ChatMessage {
                            role: "system",
                            content: SYSTEM_PROMPT,
                        },
                        ChatMessage {
                            role: "user",
                            content: prompt,
                        },
                    ],
                    temperature: TEMPERATURE,
                }),
            Provider::Anthropic => self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&MessagesRequest {
                    model: &self.model,
                    max_tokens: MAX_TOKENS,
                    system: SYSTEM_PROMPT,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    temperature: TEMPERATURE,
                }),
        };

        let response = request.timeout(self.timeout).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message: String = body.chars().take(ERROR_BODY_CHARS).collect();
            return Err(ReviewError::ApiCall {
                status: status.as_u16(),
                message,
            });
        }

        extract_text(self.provider, &body)
    }
}

/// API 응답 봉투에서 모델 텍스트를 꺼낸다
fn extract_text(provider: Provider, body: &str) -> Result<String> {
    let text = match provider {
        Provider::OpenAi => {
            let response: ChatResponse = serde_json::from_str(body)
                .map_err(|e| ReviewError::ApiParse(format!("OpenAI 응답 형식 오류: {}", e)))?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .unwrap_or_default()
        }
        Provider::Anthropic => {
            let response: MessagesResponse = serde_json::from_str(body)
                .map_err(|e| ReviewError::ApiParse(format!("Anthropic 응답 형식 오류: {}", e)))?;
            response
                .content
                .into_iter()
                .filter(|block| block.kind == "text")
                .map(|block| block.text)
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    if text.trim().is_empty() {
        return Err(ReviewError::ApiParse("빈 응답".into()));
    }
    Ok(text)
}

impl Scorer for LlmScorer {
    fn kind(&self) -> ScorerKind {
        match self.provider {
            Provider::OpenAi => ScorerKind::Openai,
            Provider::Anthropic => ScorerKind::Anthropic,
        }
    }

    async fn score(&self, document: &Document, meta: ReportMeta) -> Result<AnalysisReport> {
        let prompt = build_analysis_prompt(&document.file_name, &document.content);
        tracing::debug!(
            provider = ?self.provider,
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "AI 분석 요청"
        );

        let text = self.complete(&prompt).await?;
        Ok(parse_report_response(&text, meta)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_slash() {
        assert_eq!(
            Provider::OpenAi.endpoint("https://api.openai.com/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            Provider::Anthropic.endpoint("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/v1/messages"
        );
    }

    #[test]
    fn test_extract_openai_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"a\":1}"}}]}"#;
        assert_eq!(extract_text(Provider::OpenAi, body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_anthropic_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"앞"},{"type":"tool_use","id":"x"},{"type":"text","text":"뒤"}]}"#;
        assert_eq!(extract_text(Provider::Anthropic, body).unwrap(), "앞\n뒤");
    }

    #[test]
    fn test_extract_rejects_empty_or_malformed() {
        assert!(matches!(
            extract_text(Provider::OpenAi, r#"{"choices":[]}"#),
            Err(ReviewError::ApiParse(_))
        ));
        assert!(matches!(
            extract_text(Provider::Anthropic, "<html>"),
            Err(ReviewError::ApiParse(_))
        ));
    }

    #[test]
    fn test_missing_key_is_error() {
        let config = Config {
            anthropic_api_key: None,
            ..Config::default()
        };
        if std::env::var(Provider::Anthropic.env_var()).is_err() {
            let result = LlmScorer::from_config(Provider::Anthropic, &config, reqwest::Client::new());
            assert!(matches!(result, Err(ReviewError::MissingApiKey("ANTHROPIC_API_KEY"))));
        }
    }
}
