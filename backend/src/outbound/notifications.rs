//! Bounded channel notification sink.
//!
//! `enqueue` never waits: a full buffer is reported as
//! [`NotificationSinkError::Full`] and the caller moves on. A separate task
//! drains the channel; delivery transport is outside this service, so the
//! dispatcher records each event in the log.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tracing::info;

use crate::domain::NotificationEvent;
use crate::domain::ports::{NotificationSink, NotificationSinkError};

/// Sink backed by a bounded `tokio` channel.
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: Sender<NotificationEvent>,
    capacity: usize,
}

impl ChannelNotificationSink {
    /// Create a sink and the receiver its dispatcher should drain.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> (Self, Receiver<NotificationEvent>) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender, capacity }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelNotificationSink {
    async fn enqueue(&self, event: NotificationEvent) -> Result<(), NotificationSinkError> {
        self.sender.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => NotificationSinkError::full(self.capacity),
            TrySendError::Closed(_) => NotificationSinkError::closed(),
        })
    }
}

/// Drain `receiver` until every sender is dropped.
pub async fn run_notification_dispatcher(mut receiver: Receiver<NotificationEvent>) {
    while let Some(event) = receiver.recv().await {
        info!(
            kind = %event.kind,
            recipient = %event.recipient,
            "notification dispatched"
        );
    }
    info!("notification dispatcher stopped");
}
