//! Mock homework API and Telegram servers

use homework_notifier::{Config, Credentials, PracticumClient, StatusPoller, TelegramNotifier};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PATH: &str = "/api/user_api/homework_statuses/";
pub const BOT_TOKEN: &str = "123456:TEST";
pub const CHAT_ID: &str = "987654";

/// A homework API and a Telegram Bot API, both served by wiremock
pub struct MockBackends {
    pub api: MockServer,
    pub telegram: MockServer,
}

impl MockBackends {
    pub async fn start() -> Self {
        let backends = Self {
            api: MockServer::start().await,
            telegram: MockServer::start().await,
        };
        backends.telegram_accepts().await;
        backends
    }

    pub fn config(&self) -> Config {
        Config {
            credentials: Credentials {
                practicum_token: "practicum-test-token".to_string(),
                telegram_token: BOT_TOKEN.to_string(),
                telegram_chat_id: CHAT_ID.to_string(),
            },
            endpoint: format!("{}{}", self.api.uri(), API_PATH),
            telegram_api_url: self.telegram.uri(),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    pub fn poller(&self, from_date: i64) -> StatusPoller {
        let config = self.config();
        let api = Arc::new(PracticumClient::new(&config).expect("client"));
        let notifier = Arc::new(TelegramNotifier::new(&config).expect("notifier"));
        StatusPoller::starting_at(config, api, notifier, from_date).expect("poller")
    }

    /// Replace whatever the homework API currently answers
    ///
    /// This also clears the API's request log.
    pub async fn api_answers(&self, response: ResponseTemplate) {
        self.api.reset().await;
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .respond_with(response)
            .mount(&self.api)
            .await;
    }

    pub async fn api_returns_homeworks(&self, current_date: i64, homeworks: Value) {
        self.api_answers(
            ResponseTemplate::new(200)
                .set_body_json(json!({"current_date": current_date, "homeworks": homeworks})),
        )
        .await;
    }

    async fn telegram_accepts(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/bot{BOT_TOKEN}/sendMessage")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"message_id": 1}})),
            )
            .mount(&self.telegram)
            .await;
    }

    pub async fn telegram_rejects(&self) {
        self.telegram.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&self.telegram)
            .await;
    }

    /// Texts of every message the Telegram mock has received, in order
    pub async fn sent_messages(&self) -> Vec<String> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
            .map(|body| {
                assert_eq!(body["chat_id"], CHAT_ID);
                body["text"].as_str().unwrap_or_default().to_string()
            })
            .collect()
    }

    /// `from_date` query values the homework API has received, in order
    pub async fn requested_from_dates(&self) -> Vec<String> {
        self.api
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "from_date")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }
}

/// A one-element homework list shaped like a real API answer
pub fn homework(name: &str, status: &str) -> Value {
    json!([{
        "id": 124,
        "status": status,
        "homework_name": name,
        "reviewer_comment": "",
        "date_updated": "2024-02-13T14:40:57Z",
        "lesson_name": "Final project"
    }])
}
