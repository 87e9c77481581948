//! Action: a unit of work performed when a rule fires.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Config key that forces an action to fail when set to `true`.
pub const SHOULD_FAIL_KEY: &str = "should_fail";

/// An operation executed when the rule's trigger fires.
///
/// `action_type` selects the handler; `config` is handed to it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl Action {
    /// Create an action with an empty configuration.
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            config: Map::new(),
        }
    }

    /// Set a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Shorthand for an action configured to fail.
    #[must_use]
    pub fn failing(action_type: impl Into<String>) -> Self {
        Self::new(action_type).with_config(SHOULD_FAIL_KEY, true)
    }

    /// Whether the configuration asks this action to fail.
    #[must_use]
    pub fn should_fail(&self) -> bool {
        self.config
            .get(SHOULD_FAIL_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Read a string configuration entry.
    #[must_use]
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.action_type)
    }
}
