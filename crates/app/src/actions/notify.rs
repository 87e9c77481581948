//! `notify` action: publishes a notification on an in-process channel.
//!
//! Config:
//! - `message` (string, required): the notification text
//! - `channel` (string, optional): routing key for subscribers, `"default"` if absent

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::broadcast;

use nautilus_domain::error::ActionError;
use nautilus_domain::rule::Action;

use crate::ports::{ActionHandler, ExecutionContext};

/// A notification produced by a `notify` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub channel: String,
    pub message: String,
    /// Type of the event that fired the rule, if any.
    pub event_type: Option<String>,
}

/// Publishes [`Notification`]s on a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notification is simply dropped). Clones share the same channel.
#[derive(Debug, Clone)]
pub struct NotifyHandler {
    sender: broadcast::Sender<Notification>,
}

impl NotifyHandler {
    pub const ACTION_TYPE: &'static str = "notify";

    /// Create a handler whose channel buffers up to `capacity` notifications
    /// per lagging subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl ActionHandler for NotifyHandler {
    fn handle<'a>(
        &'a self,
        action: &'a Action,
        ctx: &'a ExecutionContext<'a>,
    ) -> BoxFuture<'a, Result<(), ActionError>> {
        let outcome = build_notification(action, ctx).map(|notification| {
            // send fails only when there are zero receivers
            let _ = self.sender.send(notification);
        });
        Box::pin(async move { outcome })
    }
}

fn build_notification(
    action: &Action,
    ctx: &ExecutionContext<'_>,
) -> Result<Notification, ActionError> {
    let message = action
        .config_str("message")
        .ok_or_else(|| ActionError::InvalidConfig {
            field: "message".to_string(),
            reason: "expected a string".to_string(),
        })?;
    Ok(Notification {
        channel: action.config_str("channel").unwrap_or("default").to_string(),
        message: message.to_string(),
        event_type: ctx.event.and_then(|e| e.event_type()).map(str::to_string),
    })
}
