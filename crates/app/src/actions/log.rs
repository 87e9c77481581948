//! `log` action: writes a structured log line.
//!
//! Config:
//! - `message` (string, optional): the text to log
//! - `level` (string, optional): `error`, `warn`, `info` (default), `debug` or `trace`

use futures::future::BoxFuture;

use nautilus_domain::error::ActionError;
use nautilus_domain::rule::Action;

use crate::ports::{ActionHandler, ExecutionContext};

/// Writes the configured message through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHandler;

impl LogHandler {
    pub const ACTION_TYPE: &'static str = "log";
}

impl ActionHandler for LogHandler {
    fn handle<'a>(
        &'a self,
        action: &'a Action,
        ctx: &'a ExecutionContext<'a>,
    ) -> BoxFuture<'a, Result<(), ActionError>> {
        let outcome = write_log(action, ctx);
        Box::pin(async move { outcome })
    }
}

fn write_log(action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
    let message = action.config_str("message").unwrap_or("rule fired");
    let event_type = ctx.event.and_then(|e| e.event_type()).unwrap_or("-");
    match action.config_str("level").unwrap_or("info") {
        "error" => tracing::error!(event_type, "{message}"),
        "warn" => tracing::warn!(event_type, "{message}"),
        "info" => tracing::info!(event_type, "{message}"),
        "debug" => tracing::debug!(event_type, "{message}"),
        "trace" => tracing::trace!(event_type, "{message}"),
        other => {
            return Err(ActionError::InvalidConfig {
                field: "level".to_string(),
                reason: format!("unknown log level `{other}`"),
            });
        }
    }
    Ok(())
}
