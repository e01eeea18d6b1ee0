//! Notification delivery through the Telegram Bot API.

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Delivers notification text to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text` to the fixed destination
    ///
    /// # Errors
    ///
    /// Returns [`Error::SendMessage`] if the transport rejects the message.
    async fn send_message(&self, text: &str) -> Result<()>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// [`Notifier`] backed by a Telegram bot
pub struct TelegramNotifier {
    http_client: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the bot and chat in `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self {
            http_client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.credentials.telegram_token
            ),
            chat_id: config.credentials.telegram_chat_id.clone(),
        })
    }

    async fn deliver(&self, text: &str) -> std::result::Result<(), String> {
        let response = self
            .http_client
            .post(&self.send_url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            // without_url keeps the bot token out of the message
            .map_err(|e| format!("request failed: {}", e.without_url()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reply = serde_json::from_str::<TelegramResponse>(&body).ok();

        if !status.is_success() {
            let detail = reply
                .and_then(|r| r.description)
                .unwrap_or(body);
            return Err(format!("Telegram returned status {status}: {detail}"));
        }

        match reply {
            Some(TelegramResponse { ok: true, .. }) => Ok(()),
            Some(TelegramResponse { description, .. }) => Err(format!(
                "Telegram rejected the message: {}",
                description.unwrap_or_else(|| "no description".to_string())
            )),
            None => Err(format!("unexpected Telegram response: {body}")),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        match self.deliver(text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, message = %text, "Message sent");
                Ok(())
            }
            Err(reason) => {
                error!(chat_id = %self.chat_id, error = %reason, "Failed to send message");
                Err(Error::SendMessage(reason))
            }
        }
    }
}
