//! # homework-notifier
//!
//! Watches the review status of your latest homework submission and sends a
//! Telegram message whenever it changes.
//!
//! ## How it works
//!
//! Every cycle the poller:
//! - queries the homework status API for changes since `from_date`
//! - validates the shape of the answer
//! - renders the most recent homework into a notification text
//! - sends that text to the configured chat, unless it equals the last one sent
//!
//! Then it sleeps for the retry period (10 minutes by default) and starts over.
//! Only missing credentials stop the poller; every other failure is logged and
//! the next cycle runs as usual.
//!
//! ## Quick Start
//!
//! ```no_run
//! use homework_notifier::{Config, PracticumClient, StatusPoller, TelegramNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let api = Arc::new(PracticumClient::new(&config)?);
//!     let notifier = Arc::new(TelegramNotifier::new(&config)?);
//!
//!     let poller = StatusPoller::new(config, api, notifier)?;
//!     homework_notifier::run_with_shutdown(poller).await;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Homework API client
pub mod api_client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Notification delivery
pub mod notifier;
/// Polling loop
pub mod poller;
/// Verdicts and status rendering
pub mod status;
/// Core types
pub mod types;
/// Response shape validation
pub mod validation;

// Re-export commonly used types
pub use api_client::{HomeworkApi, PracticumClient};
pub use config::{Config, Credentials};
pub use error::{ApiAnswerError, Error, ParseStatusError, ResponseShapeError, Result};
pub use notifier::{Notifier, TelegramNotifier};
pub use poller::StatusPoller;
pub use status::{Verdict, parse_status};
pub use types::{CycleOutcome, PollerState};
pub use validation::check_response;

use tokio_util::sync::CancellationToken;

/// Run the poller until the process receives a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// The current cycle is allowed to finish; the pending sleep is cut short.
pub async fn run_with_shutdown(poller: StatusPoller) {
    let shutdown = CancellationToken::new();
    let poll_task = tokio::spawn(poller.run(shutdown.clone()));

    wait_for_signal().await;
    shutdown.cancel();

    if let Err(e) = poll_task.await {
        tracing::error!(error = %e, "Poller task ended abnormally");
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration can fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
