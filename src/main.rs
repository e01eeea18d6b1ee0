use homework_notifier::{Config, PracticumClient, StatusPoller, TelegramNotifier};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging with tracing-subscriber.
///
/// `RUST_LOG` wins when set, otherwise `HOMEWORK_LOG_LEVEL` (default: info).
fn init_logging() {
    let fallback = std::env::var("HOMEWORK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Homework notifier cannot start");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> homework_notifier::Result<()> {
    let config = Config::from_env()?;
    let api = Arc::new(PracticumClient::new(&config)?);
    let notifier = Arc::new(TelegramNotifier::new(&config)?);

    let poller = StatusPoller::new(config, api, notifier)?;
    homework_notifier::run_with_shutdown(poller).await;
    Ok(())
}
