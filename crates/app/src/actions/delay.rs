//! `delay` action: waits before the rule continues.
//!
//! Config: `ms` (unsigned integer, required), the number of milliseconds to wait.

use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::Value;

use nautilus_domain::error::ActionError;
use nautilus_domain::rule::Action;

use crate::ports::{ActionHandler, ExecutionContext};

/// Sleeps for the configured duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayHandler;

impl DelayHandler {
    pub const ACTION_TYPE: &'static str = "delay";
}

impl ActionHandler for DelayHandler {
    fn handle<'a>(
        &'a self,
        action: &'a Action,
        _ctx: &'a ExecutionContext<'a>,
    ) -> BoxFuture<'a, Result<(), ActionError>> {
        Box::pin(async move {
            let ms = action
                .config
                .get("ms")
                .and_then(Value::as_u64)
                .ok_or_else(|| ActionError::InvalidConfig {
                    field: "ms".to_string(),
                    reason: "expected an unsigned integer".to_string(),
                })?;
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(())
        })
    }
}
