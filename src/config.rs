use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "symptom-intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address when `SYMPTOM_INTAKE_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Diagnosis cache defaults: 5-minute TTL, 100 entries.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_intake=info,tower_http=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },
    #[error("Invalid value for {var}: '{value}' is not a positive integer")]
    InvalidNumber { var: &'static str, value: String },
}

/// API key + model for one LLM provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub api_key: String,
    pub model: String,
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub gemini: Option<ProviderCredentials>,
    pub openai: Option<ProviderCredentials>,
    pub openrouter: Option<ProviderCredentials>,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for AppConfig {
    /// Offline configuration: no providers, default cache, localhost.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            gemini: None,
            openai: None,
            openrouter: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let addr_raw = get("SYMPTOM_INTAKE_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidAddress {
                value: addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let credentials = |key_var: &str, model_var: &str, default_model: &str| {
            get(key_var).map(|api_key| ProviderCredentials {
                api_key,
                model: get(model_var).unwrap_or_else(|| default_model.to_string()),
            })
        };

        let ttl_secs = parse_number(
            "SYMPTOM_INTAKE_CACHE_TTL_SECS",
            get("SYMPTOM_INTAKE_CACHE_TTL_SECS"),
            DEFAULT_CACHE_TTL_SECS,
        )?;
        let capacity = parse_number(
            "SYMPTOM_INTAKE_CACHE_CAPACITY",
            get("SYMPTOM_INTAKE_CACHE_CAPACITY"),
            DEFAULT_CACHE_CAPACITY as u64,
        )?;

        Ok(Self {
            bind_addr,
            gemini: credentials("GEMINI_API_KEY", "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            openai: credentials("OPENAI_API_KEY", "OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openrouter: credentials(
                "OPENROUTER_API_KEY",
                "OPENROUTER_MODEL",
                DEFAULT_OPENROUTER_MODEL,
            ),
            cache_ttl: Duration::from_secs(ttl_secs),
            cache_capacity: capacity as usize,
        })
    }

    /// Number of LLM providers with a credential present.
    pub fn configured_provider_count(&self) -> usize {
        [&self.gemini, &self.openai, &self.openrouter]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

fn parse_number(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
