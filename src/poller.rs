//! Homework status polling loop
//!
//! The [`StatusPoller`] ties the pipeline together: query the API, validate the
//! answer, render the most recent homework and notify when the rendered status
//! differs from the last one sent. It runs one cycle at a time and sleeps a
//! fixed period after every cycle, whether the cycle succeeded or not.
//!
//! # Example
//!
//! ```no_run
//! use homework_notifier::{Config, PracticumClient, StatusPoller, TelegramNotifier};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let api = Arc::new(PracticumClient::new(&config)?);
//! let notifier = Arc::new(TelegramNotifier::new(&config)?);
//!
//! let poller = StatusPoller::new(config, api, notifier)?;
//!
//! // Runs until the token is cancelled
//! poller.run(CancellationToken::new()).await;
//! # Ok(())
//! # }
//! ```

use crate::api_client::HomeworkApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::status::parse_status;
use crate::types::{CycleOutcome, PollerState};
use crate::validation::{check_response, current_date};
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Periodically checks the latest homework and reports status changes
///
/// The poller owns the only cross-cycle state: the query window start
/// (`from_date`) and the last status text it notified about.
pub struct StatusPoller {
    config: Config,
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    state: PollerState,
    from_date: i64,
    last_status: String,
}

impl StatusPoller {
    /// Create a poller after validating the credentials
    ///
    /// The query window starts at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheckTokens`] if any credential is missing. This is the
    /// only unrecoverable failure; the poller must not be run afterwards.
    pub fn new(
        config: Config,
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let from_date = chrono::Utc::now().timestamp();
        Self::starting_at(config, api, notifier, from_date)
    }

    /// Like [`StatusPoller::new`], with an explicit initial `from_date`
    pub fn starting_at(
        config: Config,
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        from_date: i64,
    ) -> Result<Self> {
        debug!(state = ?PollerState::Starting, "Validating credentials");

        if !config.credentials.check_tokens() {
            let missing = config.credentials.missing();
            error!(
                state = ?PollerState::Fatal,
                missing = ?missing,
                "Required environment variables are missing, check the configuration"
            );
            return Err(Error::CheckTokens { missing });
        }

        Ok(Self {
            config,
            api,
            notifier,
            state: PollerState::Starting,
            from_date,
            last_status: String::new(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Start of the window the next API call will ask for (UNIX seconds)
    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Text of the last status that was notified (or attempted)
    pub fn last_status(&self) -> &str {
        &self.last_status
    }

    /// Run the poller until `shutdown` is cancelled
    ///
    /// Each iteration runs one cycle via [`StatusPoller::poll_once`], then
    /// sleeps for the configured retry period. Per-cycle failures never end the
    /// loop.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            endpoint = %self.config.endpoint,
            retry_period = ?self.config.retry_period,
            from_date = self.from_date,
            "Homework status poller started"
        );

        while !shutdown.is_cancelled() {
            let _ = self.poll_once().await;

            self.state = PollerState::Sleeping;
            tokio::select! {
                _ = sleep(self.config.retry_period) => {}
                _ = shutdown.cancelled() => break,
            }
        }

        info!("Homework status poller stopped");
    }

    /// Run a single polling cycle
    ///
    /// Every error is logged and returned as [`CycleOutcome::Failed`]. A
    /// notification failure is reported as [`CycleOutcome::DeliveryFailed`]
    /// and does not undo the status update.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        self.state = PollerState::Polling;

        match self.poll_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Program failure");
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn poll_cycle(&mut self) -> Result<CycleOutcome> {
        let response = self.api.get_api_answer(self.from_date).await?;
        let homeworks = check_response(&response)?;

        if self.config.advance_from_date
            && let Some(date) = current_date(&response)
        {
            debug!(from = self.from_date, to = date, "Advancing from_date");
            self.from_date = date;
        }

        let Some(latest) = homeworks.first() else {
            info!("Status not updated");
            return Ok(CycleOutcome::NoUpdates);
        };

        let status = parse_status(latest)?;
        if status == self.last_status {
            debug!(status = %status, "Homework status unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        self.last_status = status.clone();
        match self.notifier.send_message(&status).await {
            Ok(()) => {
                info!("Homework status change notified");
                Ok(CycleOutcome::Notified(status))
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Status change could not be delivered");
                Ok(CycleOutcome::DeliveryFailed(status))
            }
        }
    }
}
