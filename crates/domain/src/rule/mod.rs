//! Rule: a named binding of one trigger to an ordered list of actions.
//!
//! Each rule has a [`Trigger`] deciding when it fires, one or more
//! [`Action`]s executed in order, an `enabled` flag and a `priority`
//! (higher runs first among rules matching the same event).
//!
//! Rules are accepted as-is: the store performs no validation of trigger
//! or action shape.

mod action;
mod operator;
mod trigger;

pub use action::{Action, SHOULD_FAIL_KEY};
pub use operator::Operator;
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::id::RuleId;

/// A rule that reacts to events by executing actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub trigger: Trigger,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub priority: i32,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check whether this rule's trigger fires for `event`.
    ///
    /// Ignores the `enabled` flag; the dispatcher filters disabled rules.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.trigger.matches(event)
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    trigger: Option<Trigger>,
    actions: Vec<Action>,
    enabled: Option<bool>,
    priority: i32,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<RuleId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Consume the builder and return a [`Rule`].
    ///
    /// Missing fields fall back to a random id, an empty name, an
    /// [`Unsupported`](Trigger::Unsupported) trigger, `enabled = true`
    /// and priority `0`.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            trigger: self.trigger.unwrap_or(Trigger::Unsupported),
            actions: self.actions,
            enabled: self.enabled.unwrap_or(true),
            priority: self.priority,
        }
    }
}
