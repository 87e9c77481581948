//! Action handler port: performs the work behind one action type.
//!
//! Handlers are looked up by [`Action::action_type`] in the
//! [`ActionHandlerRegistry`](crate::actions::ActionHandlerRegistry), so the
//! trait is object safe and returns a boxed future.

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use nautilus_domain::error::ActionError;
use nautilus_domain::event::Event;
use nautilus_domain::rule::Action;

/// What a handler gets to see besides its own action.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext<'a> {
    /// The event that fired the rule, when dispatched through `process_event`.
    pub event: Option<&'a Event>,
    /// Free-form data supplied by the caller of `execute_rule`.
    pub data: Map<String, Value>,
}

impl<'a> ExecutionContext<'a> {
    /// Context for a rule fired by `event`.
    #[must_use]
    pub fn for_event(event: &'a Event) -> Self {
        Self {
            event: Some(event),
            data: Map::new(),
        }
    }

    /// Add a data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Executes actions of one type.
///
/// Errors are caught by the engine and counted against the rule; they never
/// abort the remaining actions.
pub trait ActionHandler: Send + Sync {
    fn handle<'a>(
        &'a self,
        action: &'a Action,
        ctx: &'a ExecutionContext<'a>,
    ) -> BoxFuture<'a, Result<(), ActionError>>;
}
