//! Error types for homework-notifier
//!
//! Every stage of a polling cycle reports failures through [`Error`]. Each
//! stage owns one variant, and the variant wraps a narrower kind enum with the
//! details:
//! - [`Error::CheckTokens`] - missing credentials (fatal, startup only)
//! - [`Error::GetApiAnswer`] - transport, decode or status failures from the homework API
//! - [`Error::CheckResponse`] - the API answered with an unexpected shape
//! - [`Error::ParseStatus`] - a homework record could not be rendered
//! - [`Error::SendMessage`] - the messaging transport rejected a notification

use thiserror::Error;

/// Result type alias for homework-notifier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for homework-notifier
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required credentials are absent or empty
    #[error("missing required environment variables: {}", .missing.join(", "))]
    CheckTokens {
        /// Names of the variables that were absent or empty
        missing: Vec<&'static str>,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "RETRY_PERIOD_SECS")
        key: Option<String>,
    },

    /// The homework API could not be queried
    #[error("failed to query the homework API: {0}")]
    GetApiAnswer(#[from] ApiAnswerError),

    /// The homework API answered with an unexpected payload shape
    #[error("unexpected API response: {0}")]
    CheckResponse(#[from] ResponseShapeError),

    /// A homework record could not be turned into a notification
    #[error("failed to parse homework status: {0}")]
    ParseStatus(#[from] ParseStatusError),

    /// The notification could not be delivered
    #[error("failed to send message: {0}")]
    SendMessage(String),
}

/// Failures of a single homework API request
#[derive(Debug, Error)]
pub enum ApiAnswerError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body was not valid JSON
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    /// The API answered with a status other than 200 OK
    #[error("API returned status {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the API
        status: u16,
    },
}

/// Shape violations found while validating an API response
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseShapeError {
    /// At least one of the required top-level keys is absent
    #[error("response keys do not match the expected keys: {expected:?}")]
    MissingKeys {
        /// The keys every response must carry
        expected: &'static [&'static str],
    },

    /// The response is not a JSON object
    #[error("response data is a JSON {found}, expected an object")]
    NotAnObject {
        /// JSON type name of the value that was received
        found: &'static str,
    },

    /// The `homeworks` value is not a JSON array
    #[error("\"homeworks\" is not a list")]
    HomeworksNotAList,
}

/// Reasons a homework record cannot be rendered
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseStatusError {
    /// The verdict code is missing or not one of the known verdicts
    #[error("unexpected homework status: {}", .status.as_deref().unwrap_or("<none>"))]
    UnknownVerdict {
        /// The verdict code found in the record, if any
        status: Option<String>,
    },

    /// The record has no usable `homework_name`
    #[error("homework record has no \"homework_name\"")]
    MissingHomeworkName,
}

impl Error {
    /// Machine-readable code for this error, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Error::CheckTokens { .. } => "check_tokens",
            Error::Config { .. } => "config_error",
            Error::GetApiAnswer(_) => "get_api_answer",
            Error::CheckResponse(_) => "check_response",
            Error::ParseStatus(_) => "parse_status",
            Error::SendMessage(_) => "send_message",
        }
    }

    /// Whether this error must stop the process
    ///
    /// Only configuration problems are fatal. Every per-cycle error is logged
    /// and the poller carries on after its regular sleep.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CheckTokens { .. } | Error::Config { .. })
    }
}
