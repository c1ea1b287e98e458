//! Notification events emitted after lifecycle mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;
use super::ports::NotificationSink;

/// Why a user is being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Someone applied to the recipient's project.
    Apply,
    /// The recipient's tryout was accepted.
    Accepted,
    /// The recipient's tryout was rejected.
    Rejected,
    /// Someone commented on the recipient's project.
    Comment,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Apply => "APPLY",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Comment => "COMMENT",
        };
        f.write_str(label)
    }
}

/// Fire-and-forget event handed to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub recipient: UserId,
}

impl NotificationEvent {
    /// Build an event for `recipient`.
    pub const fn new(kind: NotificationKind, recipient: UserId) -> Self {
        Self { kind, recipient }
    }
}

/// Hand `event` to `sink`, logging instead of failing when it is refused.
pub(crate) async fn dispatch_notification(sink: &dyn NotificationSink, event: NotificationEvent) {
    match sink.enqueue(event).await {
        Ok(()) => tracing::debug!(
            kind = %event.kind,
            recipient = %event.recipient,
            "notification queued"
        ),
        Err(err) => tracing::warn!(
            kind = %event.kind,
            recipient = %event.recipient,
            error = %err,
            "notification dropped"
        ),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockNotificationSink, NotificationSinkError};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn dispatch_swallows_sink_failures() {
        let mut sink = MockNotificationSink::new();
        sink.expect_enqueue()
            .times(1)
            .return_once(|_| Err(NotificationSinkError::closed()));

        dispatch_notification(
            &sink,
            NotificationEvent::new(NotificationKind::Comment, UserId::random()),
        )
        .await;
    }

    #[rstest]
    fn kinds_serialise_in_upper_case() {
        let value = serde_json::to_value(NotificationKind::Accepted).expect("serialise kind");
        assert_eq!(value, "ACCEPTED");
    }
}
