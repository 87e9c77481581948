//! Action handler registry: maps action types to handlers.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use nautilus_domain::error::ActionError;
use nautilus_domain::rule::Action;

use super::{DelayHandler, LogHandler};
use crate::ports::{ActionHandler, ExecutionContext};

/// What to do with an action whose type has no registered handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownActionPolicy {
    /// Treat the action as a successful no-op.
    #[default]
    Ignore,
    /// Fail the action with [`ActionError::UnknownActionType`].
    Reject,
}

/// Dispatches actions to the handler registered for their type.
#[derive(Default)]
pub struct ActionHandlerRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
    unknown: UnknownActionPolicy,
    latency: Duration,
}

impl ActionHandlerRegistry {
    /// Create a registry without any handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `log` and `delay` handlers.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .with_handler(LogHandler::ACTION_TYPE, LogHandler)
            .with_handler(DelayHandler::ACTION_TYPE, DelayHandler)
    }

    /// Register `handler` for `action_type`, replacing any previous one.
    pub fn register(&mut self, action_type: impl Into<String>, handler: impl ActionHandler + 'static) {
        self.handlers.insert(action_type.into(), Box::new(handler));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_handler(
        mut self,
        action_type: impl Into<String>,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        self.register(action_type, handler);
        self
    }

    /// Set the policy for unregistered action types.
    #[must_use]
    pub fn unknown_action_policy(mut self, policy: UnknownActionPolicy) -> Self {
        self.unknown = policy;
        self
    }

    /// Add a fixed delay before every action, simulating backend latency.
    #[must_use]
    pub fn simulated_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Whether a handler is registered for `action_type`.
    #[must_use]
    pub fn contains(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// Execute one action.
    ///
    /// # Errors
    ///
    /// - [`ActionError::SimulatedFailure`] when the action is configured to fail
    /// - [`ActionError::UnknownActionType`] for unregistered types under
    ///   [`UnknownActionPolicy::Reject`]
    /// - whatever the handler returns
    pub async fn execute(&self, action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), ActionError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if action.should_fail() {
            return Err(ActionError::SimulatedFailure);
        }
        match self.handlers.get(&action.action_type) {
            Some(handler) => handler.handle(action, ctx).await,
            None => match self.unknown {
                UnknownActionPolicy::Ignore => {
                    tracing::debug!(action_type = %action.action_type, "no handler registered, skipping");
                    Ok(())
                }
                UnknownActionPolicy::Reject => {
                    Err(ActionError::UnknownActionType(action.action_type.clone()))
                }
            },
        }
    }
}

impl std::fmt::Debug for ActionHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().collect();
        types.sort();
        f.debug_struct("ActionHandlerRegistry")
            .field("handlers", &types)
            .field("unknown", &self.unknown)
            .field("latency", &self.latency)
            .finish()
    }
}
