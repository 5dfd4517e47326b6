pub mod api;
pub mod cache;
pub mod catalog;
pub mod chat;
pub mod clarification;
pub mod config;
pub mod diagnosis;
pub mod matching;
pub mod models;
pub mod providers;
pub mod search;
pub mod treatment;
pub mod triage;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext, ServerError};
use crate::config::{AppConfig, ConfigError};
use crate::providers::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Provider setup error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// `RUST_LOG` if set, else the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Serve the API until `shutdown` resolves.
pub async fn run<F>(config: AppConfig, shutdown: F) -> Result<(), AppError>
where
    F: std::future::Future<Output = ()> + Send,
{
    tracing::info!(
        "{} starting v{}",
        config::APP_NAME,
        config::APP_VERSION
    );

    let ctx = ApiContext::new(&config)?;
    let mut server = start_server(ctx, config.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    shutdown.await;
    server.shutdown();
    server.stopped().await;
    Ok(())
}
