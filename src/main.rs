use symptom_intake::config::AppConfig;

#[tokio::main]
async fn main() {
    symptom_intake::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    if let Err(e) = symptom_intake::run(config, shutdown).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
