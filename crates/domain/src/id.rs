//! Typed identifier for rules.
//!
//! Rule ids are caller-chosen strings (`"r1"`, `"critical-incident-alert"`).
//! [`RuleId::new`] generates a random UUID-backed one when the caller has none.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`Rule`](crate::rule::Rule).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl Default for RuleId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl RuleId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RuleId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = RuleId::new();
        let b = RuleId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_generate_uuid_shaped_ids() {
        let id = RuleId::new();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn should_keep_caller_chosen_string() {
        let id = RuleId::from("r1");
        assert_eq!(id.as_str(), "r1");
        assert_eq!(id.to_string(), "r1");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = RuleId::from("high-priority");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"high-priority\"");
        let parsed: RuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
