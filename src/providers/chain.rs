use std::sync::Arc;
use std::time::Instant;

use super::{
    http_client, DiagnosisPrompt, DiagnosisProvider, GeminiProvider, LlmDiagnosis,
    OpenAiCompatProvider, ProviderError,
};
use crate::config::AppConfig;
use crate::models::AiMode;

/// Ordered providers, tried one at a time. First success wins; a failure or
/// timeout moves on to the next provider without retrying.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn DiagnosisProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn DiagnosisProvider>>) -> Self {
        Self { providers }
    }

    /// No providers: every diagnosis takes the deterministic path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gemini, then OpenAI, then OpenRouter, skipping absent credentials.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        if config.configured_provider_count() == 0 {
            tracing::info!("No LLM provider configured; using the static catalogs only");
            return Ok(Self::empty());
        }

        let client = http_client()?;
        let mut providers: Vec<Arc<dyn DiagnosisProvider>> = Vec::new();

        match &config.gemini {
            Some(creds) => providers.push(Arc::new(GeminiProvider::new(client.clone(), creds))),
            None => tracing::debug!(mode = %AiMode::Gemini, "Provider skipped: no credential"),
        }
        match &config.openai {
            Some(creds) => {
                providers.push(Arc::new(OpenAiCompatProvider::openai(client.clone(), creds)))
            }
            None => tracing::debug!(mode = %AiMode::OpenAi, "Provider skipped: no credential"),
        }
        match &config.openrouter {
            Some(creds) => {
                providers.push(Arc::new(OpenAiCompatProvider::openrouter(client, creds)))
            }
            None => {
                tracing::debug!(mode = %AiMode::OpenRouter, "Provider skipped: no credential")
            }
        }

        Ok(Self::new(providers))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn modes(&self) -> Vec<AiMode> {
        self.providers.iter().map(|p| p.mode()).collect()
    }

    /// One attempt under the provider's timeout. On expiry the request
    /// future is dropped, which cancels the in-flight HTTP call.
    pub async fn attempt(
        provider: &dyn DiagnosisProvider,
        prompt: &DiagnosisPrompt,
    ) -> Result<LlmDiagnosis, ProviderError> {
        let budget = provider.timeout();
        match tokio::time::timeout(budget, provider.diagnose(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(budget)),
        }
    }

    /// First successful diagnosis and the mode that produced it.
    pub async fn first_success(&self, prompt: &DiagnosisPrompt) -> Option<(AiMode, LlmDiagnosis)> {
        for provider in &self.providers {
            let mode = provider.mode();
            let started = Instant::now();
            match Self::attempt(provider.as_ref(), prompt).await {
                Ok(diagnosis) => {
                    tracing::info!(
                        %mode,
                        condition = %diagnosis.condition,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Provider diagnosis succeeded"
                    );
                    return Some((mode, diagnosis));
                }
                Err(e) => {
                    tracing::warn!(
                        %mode,
                        error = %e,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Provider failed; trying next"
                    );
                }
            }
        }
        None
    }
}
