//! Event: an open record of something that happened outside the engine.
//!
//! Events are plain field → value maps. The conventional [`TYPE_FIELD`]
//! carries the event type matched by event triggers. Events are owned by the
//! caller and only borrowed by the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field holding the event type.
pub const TYPE_FIELD: &str = "type";

/// An external event presented to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    /// Create an event carrying only its `type` field.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        let event_type: String = event_type.into();
        Self::default().with(TYPE_FIELD, event_type)
    }

    /// Set a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// The conventional event type, if present and a string.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.fields.get(TYPE_FIELD).and_then(Value::as_str)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_type_field() {
        let event = Event::new("incident").with("severity", "critical");
        assert_eq!(event.event_type(), Some("incident"));
        assert_eq!(event.get("severity"), Some(&Value::from("critical")));
    }

    #[test]
    fn should_return_none_when_type_is_missing() {
        let event = Event::default().with("severity", "low");
        assert_eq!(event.event_type(), None);
    }

    #[test]
    fn should_return_none_when_type_is_not_a_string() {
        let event = Event::default().with(TYPE_FIELD, 42);
        assert_eq!(event.event_type(), None);
    }

    #[test]
    fn should_deserialize_from_flat_json_object() {
        let event: Event =
            serde_json::from_str(r#"{"type":"fuel_reading","level":12.5}"#).unwrap();
        assert_eq!(event.event_type(), Some("fuel_reading"));
        assert_eq!(event.get("level").and_then(Value::as_f64), Some(12.5));
    }

    #[test]
    fn should_reject_non_object_json() {
        let result: Result<Event, _> = serde_json::from_str("[1, 2, 3]");
        assert!(result.is_err());
    }
}
