//! Configuration types for homework-notifier

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the homework API token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat identifier
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Secrets needed to talk to the homework API and the Telegram bot
///
/// Values are kept as read. An absent variable becomes an empty string so that
/// [`Credentials::check_tokens`] is the single place that decides whether the
/// poller may start.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth token for the homework API
    #[serde(default)]
    pub practicum_token: String,

    /// Telegram bot token
    #[serde(default)]
    pub telegram_token: String,

    /// Chat that receives the notifications
    #[serde(default)]
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<redacted>" }
}

impl Credentials {
    /// Returns true iff all three credentials are present and non-empty
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the environment variables whose values are empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN_VAR).unwrap_or_default(),
            telegram_token: lookup(TELEGRAM_TOKEN_VAR).unwrap_or_default(),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID_VAR).unwrap_or_default(),
        }
    }
}

/// Main configuration for the status poller
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// API and bot secrets
    #[serde(default)]
    pub credentials: Credentials,

    /// Homework status endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL of the Telegram Bot API (default: "https://api.telegram.org")
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Pause between two polling cycles (default: 600 seconds)
    #[serde(default = "default_retry_period", with = "duration_serde")]
    pub retry_period: Duration,

    /// Timeout applied to every outbound HTTP request (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Move `from_date` forward to the API's `current_date` after each valid answer
    ///
    /// When disabled every cycle queries from the moment the poller started.
    #[serde(default = "default_true")]
    pub advance_from_date: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period: default_retry_period(),
            request_timeout: default_request_timeout(),
            advance_from_date: true,
        }
    }
}

impl Config {
    /// Build a configuration from environment variables
    ///
    /// Credentials are read as-is (see [`Credentials::check_tokens`]). The
    /// optional settings fall back to their defaults when unset:
    /// - `HOMEWORK_ENDPOINT` - homework status endpoint
    /// - `TELEGRAM_API_URL` - Telegram Bot API base URL
    /// - `RETRY_PERIOD_SECS` - pause between cycles
    /// - `REQUEST_TIMEOUT_SECS` - HTTP request timeout
    /// - `ADVANCE_FROM_DATE` - `true`/`false`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an optional setting is present but invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config {
            credentials: Credentials::from_lookup(&lookup),
            ..Default::default()
        };

        if let Some(endpoint) = non_empty(lookup("HOMEWORK_ENDPOINT")) {
            config.endpoint = parse_url("HOMEWORK_ENDPOINT", endpoint)?;
        }
        if let Some(api_url) = non_empty(lookup("TELEGRAM_API_URL")) {
            config.telegram_api_url = parse_url("TELEGRAM_API_URL", api_url)?;
        }
        if let Some(secs) = non_empty(lookup("RETRY_PERIOD_SECS")) {
            config.retry_period = parse_secs("RETRY_PERIOD_SECS", &secs)?;
        }
        if let Some(secs) = non_empty(lookup("REQUEST_TIMEOUT_SECS")) {
            config.request_timeout = parse_secs("REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(flag) = non_empty(lookup("ADVANCE_FROM_DATE")) {
            config.advance_from_date = flag.parse().map_err(|_| Error::Config {
                message: format!("expected true or false, got {flag:?}"),
                key: Some("ADVANCE_FROM_DATE".to_string()),
            })?;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_url(key: &str, value: String) -> Result<String> {
    url::Url::parse(&value).map_err(|e| Error::Config {
        message: format!("invalid URL {value:?}: {e}"),
        key: Some(key.to_string()),
    })?;
    Ok(value)
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| Error::Config {
            message: format!("expected a number of seconds, got {value:?}"),
            key: Some(key.to_string()),
        })
}

// Default value functions
fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> Duration {
    Duration::from_secs(600)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
