//! Port for queueing user notifications.
//!
//! Delivery is best effort. Callers log failures and carry on; a notification
//! never decides whether the mutation that produced it succeeded.

use async_trait::async_trait;

use crate::domain::NotificationEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification sink adapters.
    pub enum NotificationSinkError {
        /// The queue has no room for more events.
        Full { capacity: usize } =>
            "notification queue full (capacity {capacity})",
        /// The dispatcher is gone.
        Closed => "notification queue closed",
    }
}

/// Accepts notification events for asynchronous delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Queue an event without waiting for delivery.
    async fn enqueue(&self, event: NotificationEvent) -> Result<(), NotificationSinkError>;
}

/// Fixture sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationSink;

#[async_trait]
impl NotificationSink for FixtureNotificationSink {
    async fn enqueue(&self, _event: NotificationEvent) -> Result<(), NotificationSinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{NotificationKind, UserId};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_events() {
        FixtureNotificationSink
            .enqueue(NotificationEvent::new(NotificationKind::Apply, UserId::random()))
            .await
            .expect("fixture enqueue succeeds");
    }

    #[rstest]
    fn full_error_reports_capacity() {
        assert_eq!(
            NotificationSinkError::full(8_usize).to_string(),
            "notification queue full (capacity 8)"
        );
    }
}
