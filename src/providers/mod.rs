//! Remote LLM diagnosis providers and the ordered fallback chain.
//!
//! Each provider turns a `DiagnosisPrompt` into an `LlmDiagnosis` or a
//! `ProviderError`. The chain tries them strictly in order, each under its
//! own timeout; the first success wins.

pub mod chain;
pub mod gemini;
pub mod openai_compat;
pub mod parser;
pub mod prompt;

pub use chain::ProviderChain;
pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use parser::parse_diagnosis_response;
pub use prompt::DiagnosisPrompt;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{AiMode, Severity, Urgency};

pub const GEMINI_TIMEOUT: Duration = Duration::from_secs(15);
pub const OPENAI_TIMEOUT: Duration = Duration::from_secs(15);
pub const OPENROUTER_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Provider returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs may carry credentials.
        let e = e.without_url();
        if e.is_decode() {
            ProviderError::MalformedResponse(e.to_string())
        } else {
            ProviderError::HttpClient(e.to_string())
        }
    }
}

/// Diagnosis fields extracted from a provider's JSON answer.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmDiagnosis {
    pub condition: String,
    pub probability: u8,
    pub description: String,
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
    pub severity: Severity,
    pub differential_diagnosis: Vec<String>,
    pub next_steps: Vec<String>,
    pub category: String,
}

/// One remote diagnosis backend.
#[async_trait]
pub trait DiagnosisProvider: Send + Sync {
    /// Tag recorded on results this provider produces.
    fn mode(&self) -> AiMode;

    /// Budget for one `diagnose` call, enforced by the chain.
    fn timeout(&self) -> Duration;

    async fn diagnose(&self, prompt: &DiagnosisPrompt) -> Result<LlmDiagnosis, ProviderError>;
}

/// Shared HTTP client for all providers. Per-call budgets come from the chain.
pub fn http_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("symptom-intake/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::HttpClient(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Serve `router` on an ephemeral local port; returns its base URL.
    pub async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}
