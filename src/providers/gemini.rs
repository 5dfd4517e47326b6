use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    parse_diagnosis_response, DiagnosisPrompt, DiagnosisProvider, LlmDiagnosis, ProviderError,
    GEMINI_TIMEOUT,
};
use crate::config::ProviderCredentials;
use crate::models::AiMode;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Keeps the credential out of the URL, and so out of error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: credentials.api_key.clone(),
            model: credentials.model.clone(),
        }
    }

    /// Point at a different host (tests, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl DiagnosisProvider for GeminiProvider {
    fn mode(&self) -> AiMode {
        AiMode::Gemini
    }

    fn timeout(&self) -> Duration {
        GEMINI_TIMEOUT
    }

    async fn diagnose(&self, prompt: &DiagnosisPrompt) -> Result<LlmDiagnosis, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt.user }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &prompt.system }],
            },
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
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

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("No candidate text returned".into()))?;

        parse_diagnosis_response(&text)
    }
}
