//! End-to-end polling cycles against mock homework and Telegram APIs

mod common;

use common::*;
use homework_notifier::{ApiAnswerError, CycleOutcome, Error};
use serde_json::json;
use wiremock::ResponseTemplate;

const REVIEWING: &str =
    "Изменился статус проверки работы \"A\". Работа взята на проверку ревьюером.";
const APPROVED: &str =
    "Изменился статус проверки работы \"A\". Работа проверена: ревьюеру всё понравилось. Ура!";

#[tokio::test]
async fn status_changes_are_notified_exactly_once() {
    let backends = MockBackends::start().await;
    let mut poller = backends.poller(1_700_000_000);

    backends
        .api_returns_homeworks(1_700_000_600, homework("A", "reviewing"))
        .await;
    assert!(matches!(poller.poll_once().await, CycleOutcome::Notified(_)));

    // Same record again: debug log only, nothing sent
    assert!(matches!(poller.poll_once().await, CycleOutcome::Unchanged));
    assert_eq!(backends.sent_messages().await, vec![REVIEWING]);

    backends
        .api_returns_homeworks(1_700_001_200, homework("A", "approved"))
        .await;
    assert!(matches!(poller.poll_once().await, CycleOutcome::Notified(_)));

    assert_eq!(backends.sent_messages().await, vec![REVIEWING, APPROVED]);
    assert_eq!(poller.last_status(), APPROVED);
}

#[tokio::test]
async fn server_error_is_logged_and_nothing_is_sent() {
    let backends = MockBackends::start().await;
    let mut poller = backends.poller(1_700_000_000);

    backends
        .api_answers(ResponseTemplate::new(500).set_body_json(json!({"code": "internal"})))
        .await;

    let outcome = poller.poll_once().await;
    assert!(
        matches!(
            outcome,
            CycleOutcome::Failed(Error::GetApiAnswer(ApiAnswerError::UnexpectedStatus {
                status: 500
            }))
        ),
        "got {outcome:?}"
    );
    assert!(backends.sent_messages().await.is_empty());
    assert_eq!(poller.last_status(), "");
    assert_eq!(poller.from_date(), 1_700_000_000);
}

#[tokio::test]
async fn empty_homework_list_sends_nothing() {
    let backends = MockBackends::start().await;
    let mut poller = backends.poller(1_700_000_000);

    backends.api_returns_homeworks(1_700_000_600, json!([])).await;

    assert!(matches!(poller.poll_once().await, CycleOutcome::NoUpdates));
    assert!(backends.sent_messages().await.is_empty());
    assert_eq!(poller.last_status(), "");
}

#[tokio::test]
async fn from_date_follows_the_api_current_date() {
    let backends = MockBackends::start().await;
    let mut poller = backends.poller(1_700_000_000);

    backends.api_returns_homeworks(1_700_000_600, json!([])).await;
    let _ = poller.poll_once().await;
    let _ = poller.poll_once().await;

    assert_eq!(
        backends.requested_from_dates().await,
        vec!["1700000000".to_string(), "1700000600".to_string()]
    );
    assert_eq!(poller.from_date(), 1_700_000_600);
}

#[tokio::test]
async fn blocked_bot_does_not_cause_a_resend() {
    let backends = MockBackends::start().await;
    backends.telegram_rejects().await;
    let mut poller = backends.poller(1_700_000_000);

    backends
        .api_returns_homeworks(1_700_000_600, homework("A", "approved"))
        .await;

    assert!(matches!(
        poller.poll_once().await,
        CycleOutcome::DeliveryFailed(_)
    ));
    assert!(matches!(poller.poll_once().await, CycleOutcome::Unchanged));
    assert_eq!(backends.sent_messages().await.len(), 1);
    assert_eq!(poller.last_status(), APPROVED);
}

#[tokio::test]
async fn malformed_record_fails_the_cycle() {
    let backends = MockBackends::start().await;
    let mut poller = backends.poller(1_700_000_000);

    backends
        .api_returns_homeworks(1_700_000_600, json!([{"status": "approved"}]))
        .await;

    match poller.poll_once().await {
        CycleOutcome::Failed(e) => assert_eq!(e.kind(), "parse_status"),
        other => panic!("expected a parse failure, got {other:?}"),
    }
    assert!(backends.sent_messages().await.is_empty());
}
