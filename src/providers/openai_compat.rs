//! OpenAI-compatible `/chat/completions` client, shared by OpenAI and
//! OpenRouter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use super::{
    parse_diagnosis_response, DiagnosisPrompt, DiagnosisProvider, LlmDiagnosis, ProviderError,
    OPENAI_TIMEOUT, OPENROUTER_TIMEOUT,
};
use crate::config::{ProviderCredentials, APP_NAME};
use crate::models::AiMode;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    mode: AiMode,
    timeout: Duration,
    /// OpenAI honours `response_format`; OpenRouter models may not.
    json_mode: bool,
}

impl OpenAiCompatProvider {
    pub fn openai(client: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: credentials.api_key.clone(),
            model: credentials.model.clone(),
            mode: AiMode::OpenAi,
            timeout: OPENAI_TIMEOUT,
            json_mode: true,
        }
    }

    pub fn openrouter(client: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            client,
            base_url: OPENROUTER_BASE_URL.to_string(),
            api_key: credentials.api_key.clone(),
            model: credentials.model.clone(),
            mode: AiMode::OpenRouter,
            timeout: OPENROUTER_TIMEOUT,
            json_mode: false,
        }
    }

    /// Point at a different host (tests, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            ProviderError::HttpClient(format!(
                "API key for {} is not a valid header value",
                self.mode
            ))
        })?;
        headers.insert(AUTHORIZATION, bearer);
        if self.mode == AiMode::OpenRouter {
            headers.insert("x-title", HeaderValue::from_static(APP_NAME));
        }
        Ok(headers)
    }
}

#[async_trait]
impl DiagnosisProvider for OpenAiCompatProvider {
    fn mode(&self) -> AiMode {
        self.mode
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn diagnose(&self, prompt: &DiagnosisPrompt) -> Result<LlmDiagnosis, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: 0.2,
            response_format: self.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("No response choices returned".into())
            })?;

        parse_diagnosis_response(&content)
    }
}
