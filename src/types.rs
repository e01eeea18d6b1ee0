//! Core types shared by the poller and its callers

use crate::error::Error;

/// Lifecycle state of a [`StatusPoller`](crate::StatusPoller)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerState {
    /// Credentials are being validated
    Starting,
    /// A cycle is querying the API and possibly notifying
    Polling,
    /// Waiting out the retry period before the next cycle
    Sleeping,
    /// Startup failed, the poller will never run
    Fatal,
}

/// What a single polling cycle did
#[must_use]
#[derive(Debug)]
pub enum CycleOutcome {
    /// The API returned no homeworks for the current window
    NoUpdates,

    /// The latest homework still renders to the last notified status
    Unchanged,

    /// A new status was rendered and delivered
    Notified(String),

    /// A new status was rendered and recorded, but delivery failed
    ///
    /// The status still counts as notified, so the next cycle will not retry it.
    DeliveryFailed(String),

    /// A stage of the cycle failed before anything was recorded
    Failed(Error),
}

impl CycleOutcome {
    /// Whether the cycle attempted to send a notification
    pub fn attempted_notification(&self) -> bool {
        matches!(
            self,
            CycleOutcome::Notified(_) | CycleOutcome::DeliveryFailed(_)
        )
    }
}
