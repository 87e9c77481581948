//! Trigger: the predicate that decides whether a rule fires for an event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Operator;
use crate::event::Event;

/// Describes which events should fire a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires when the event's `type` equals `event_type` exactly.
    Event {
        #[serde(alias = "eventType")]
        event_type: String,
    },
    /// Fires when the event's `field` satisfies `operator` against `value`.
    Condition {
        field: String,
        operator: Operator,
        value: Value,
    },
    /// Any trigger kind this engine does not understand. Never fires.
    #[serde(other)]
    Unsupported,
}

impl Trigger {
    /// Shorthand for an event-type trigger.
    #[must_use]
    pub fn event(event_type: impl Into<String>) -> Self {
        Self::Event {
            event_type: event_type.into(),
        }
    }

    /// Shorthand for a field-condition trigger.
    #[must_use]
    pub fn condition(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self::Condition {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Check whether this trigger fires for `event`.
    ///
    /// Pure and side-effect free. Anything that cannot be positively
    /// confirmed as a match (missing field, unknown operator, unsupported
    /// kind) yields `false`.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::Event { event_type } => event.event_type() == Some(event_type.as_str()),
            Self::Condition {
                field,
                operator,
                value,
            } => event
                .get(field)
                .is_some_and(|actual| operator.apply(actual, value)),
            Self::Unsupported => false,
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event { event_type } => write!(f, "event({event_type})"),
            Self::Condition {
                field,
                operator,
                value,
            } => write!(f, "condition({field} {operator} {value})"),
            Self::Unsupported => f.write_str("unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_match_event_trigger_on_exact_type() {
        let trigger = Trigger::event("incident");
        assert!(trigger.matches(&Event::new("incident")));
        assert!(!trigger.matches(&Event::new("incident_closed")));
        assert!(!trigger.matches(&Event::new("Incident")));
    }

    #[test]
    fn should_not_match_event_trigger_without_type() {
        let trigger = Trigger::event("incident");
        assert!(!trigger.matches(&Event::default().with("severity", "critical")));
    }

    #[test]
    fn should_match_condition_on_field_value() {
        let trigger = Trigger::condition("severity", Operator::Equals, "critical");
        let event = Event::new("incident").with("severity", "critical");
        assert!(trigger.matches(&event));
    }

    #[test]
    fn should_not_match_condition_when_field_missing() {
        let trigger = Trigger::condition("severity", Operator::Equals, "critical");
        assert!(!trigger.matches(&Event::new("incident")));
    }

    #[test]
    fn should_match_contains_condition_on_message() {
        let trigger = Trigger::condition("message", Operator::Contains, "alarm");
        assert!(trigger.matches(&Event::default().with("message", "System alarm detected")));
        assert!(!trigger.matches(&Event::default().with("message", "System normal")));
    }

    #[test]
    fn should_not_match_unknown_operator() {
        let trigger = Trigger::condition("speed", Operator::Unknown, 10);
        assert!(!trigger.matches(&Event::default().with("speed", 10)));
    }

    #[test]
    fn should_never_match_unsupported_trigger() {
        assert!(!Trigger::Unsupported.matches(&Event::new("anything")));
    }

    #[test]
    fn should_deserialize_tagged_condition() {
        let json = json!({
            "kind": "condition",
            "field": "fuel_level",
            "operator": "less_than",
            "value": 15
        });
        let trigger: Trigger = serde_json::from_value(json).unwrap();
        assert_eq!(trigger, Trigger::condition("fuel_level", Operator::LessThan, 15));
    }

    #[test]
    fn should_fire_triggers_written_with_camel_case_names() {
        let greater: Trigger = serde_json::from_value(json!({
            "kind": "condition",
            "field": "speed",
            "operator": "greaterThan",
            "value": 10
        }))
        .unwrap();
        assert!(greater.matches(&Event::default().with("speed", 20)));
        assert!(!greater.matches(&Event::default().with("speed", 5)));

        let less: Trigger = serde_json::from_value(json!({
            "kind": "condition",
            "field": "fuel_level",
            "operator": "lessThan",
            "value": 15
        }))
        .unwrap();
        assert!(less.matches(&Event::default().with("fuel_level", 12)));

        let event: Trigger =
            serde_json::from_value(json!({ "kind": "event", "eventType": "incident" })).unwrap();
        assert_eq!(event, Trigger::event("incident"));
        assert!(event.matches(&Event::new("incident")));
    }

    #[test]
    fn should_deserialize_unknown_kind_as_unsupported() {
        let json = json!({ "kind": "schedule" });
        let trigger: Trigger = serde_json::from_value(json).unwrap();
        assert_eq!(trigger, Trigger::Unsupported);
    }

    #[test]
    fn should_display_trigger_variants() {
        assert_eq!(Trigger::event("test").to_string(), "event(test)");
        assert_eq!(
            Trigger::condition("speed", Operator::GreaterThan, 20).to_string(),
            "condition(speed greater_than 20)"
        );
        assert_eq!(Trigger::Unsupported.to_string(), "unsupported");
    }
}
