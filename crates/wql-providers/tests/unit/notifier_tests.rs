//! Tests for operator notifiers

use chrono::Utc;
use tokio::sync::broadcast::error::TryRecvError;
use wql_domain::error::QueryFailure;
use wql_domain::events::OperatorNotice;
use wql_domain::ports::infrastructure::OperatorNotifier;
use wql_providers::notifier::{BroadcastNotifier, LogNotifier, NullNotifier};

fn notice() -> OperatorNotice {
    OperatorNotice::new(
        QueryFailure::ExecutionFailure {
            detail: "Syntax error".to_string(),
        },
        "SELECT broken",
        Utc::now(),
    )
}

#[test]
fn test_broadcast_delivers_to_every_subscriber() {
    let notifier = BroadcastNotifier::with_capacity(8);
    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();
    assert_eq!(notifier.subscriber_count(), 2);

    let sent = notice();
    notifier.notify(&sent);

    assert_eq!(first.try_recv().unwrap(), sent);
    assert_eq!(second.try_recv().unwrap().subject, "SELECT broken");
    assert!(matches!(first.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_broadcast_without_subscribers_does_not_fail() {
    let notifier = BroadcastNotifier::new();
    notifier.notify(&notice());
    assert_eq!(notifier.subscriber_count(), 0);
}

#[test]
fn test_provider_names() {
    assert_eq!(LogNotifier::new().provider_name(), "log");
    assert_eq!(BroadcastNotifier::new().provider_name(), "broadcast");
    assert_eq!(NullNotifier::new().provider_name(), "null");
}

#[test]
fn test_log_and_null_accept_notices() {
    LogNotifier::new().notify(&notice());
    NullNotifier::new().notify(&notice());
}
