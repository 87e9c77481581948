//! Rules file loading.
//!
//! Rules are declared as `[[rules]]` tables whose shape matches
//! [`Rule`](nautilus_domain::rule::Rule):
//!
//! ```toml
//! [[rules]]
//! id = "critical-incident"
//! name = "Escalate critical incidents"
//! priority = 10
//! trigger = { kind = "condition", field = "severity", operator = "equals", value = "critical" }
//!
//! [[rules.actions]]
//! type = "notify"
//! config = { channel = "bridge", message = "Critical incident reported" }
//! ```

use std::path::Path;

use nautilus_domain::rule::Rule;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Parse a rules document.
///
/// # Errors
///
/// Returns [`RulesFileError::Parse`] when the document is not valid TOML or
/// a rule does not have the expected shape.
pub fn parse(content: &str) -> Result<Vec<Rule>, RulesFileError> {
    let file: RulesFile = toml::from_str(content)?;
    Ok(file.rules)
}

/// Load rules from `path`. A missing file yields no rules.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<Rule>, RulesFileError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "rules file not found, starting without rules");
            Ok(Vec::new())
        }
        Err(err) => Err(RulesFileError::Io(err)),
    }
}

/// Rules file errors.
#[derive(Debug, thiserror::Error)]
pub enum RulesFileError {
    /// TOML parse or shape failure.
    #[error("failed to parse rules file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read rules file")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nautilus_domain::rule::{Operator, Trigger};

    #[test]
    fn should_parse_rules_with_actions() {
        let rules = parse(
            r#"
            [[rules]]
            id = "critical-incident"
            name = "Escalate critical incidents"
            priority = 10
            trigger = { kind = "condition", field = "severity", operator = "equals", value = "critical" }

            [[rules.actions]]
            type = "notify"
            config = { channel = "bridge", message = "Critical incident reported" }

            [[rules.actions]]
            type = "log"

            [[rules]]
            id = "fuel-low"
            name = "Fuel low"
            enabled = false
            trigger = { kind = "event", event_type = "fuel_low" }
            "#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        let critical = &rules[0];
        assert_eq!(critical.id.as_str(), "critical-incident");
        assert_eq!(critical.priority, 10);
        assert_eq!(
            critical.trigger,
            Trigger::condition("severity", Operator::Equals, "critical")
        );
        assert_eq!(critical.actions.len(), 2);
        assert_eq!(critical.actions[0].config_str("channel"), Some("bridge"));
        assert!(critical.actions[1].config.is_empty());

        let fuel = &rules[1];
        assert!(!fuel.enabled);
        assert_eq!(fuel.priority, 0);
        assert!(fuel.actions.is_empty());
    }

    #[test]
    fn should_parse_numeric_condition_values() {
        let rules = parse(
            r#"
            [[rules]]
            id = "overspeed"
            name = "Overspeed"
            trigger = { kind = "condition", field = "speed_knots", operator = "greater_than", value = 22.5 }
            "#,
        )
        .unwrap();
        assert_eq!(
            rules[0].trigger,
            Trigger::condition("speed_knots", Operator::GreaterThan, 22.5)
        );
    }

    #[test]
    fn should_parse_camel_case_operator_and_event_type() {
        let rules = parse(
            r#"
            [[rules]]
            id = "overspeed"
            name = "Overspeed"
            trigger = { kind = "condition", field = "speed_knots", operator = "greaterThan", value = 22 }

            [[rules]]
            id = "incident"
            name = "Incident"
            trigger = { kind = "event", eventType = "incident" }
            "#,
        )
        .unwrap();
        assert_eq!(
            rules[0].trigger,
            Trigger::condition("speed_knots", Operator::GreaterThan, 22)
        );
        assert_eq!(rules[1].trigger, Trigger::event("incident"));
    }

    #[test]
    fn should_keep_unknown_operator_and_kind_as_non_matching() {
        let rules = parse(
            r#"
            [[rules]]
            id = "a"
            name = "Unknown operator"
            trigger = { kind = "condition", field = "x", operator = "matches_regex", value = "y" }

            [[rules]]
            id = "b"
            name = "Unknown kind"
            trigger = { kind = "schedule" }
            "#,
        )
        .unwrap();
        assert!(matches!(
            rules[0].trigger,
            Trigger::Condition {
                operator: Operator::Unknown,
                ..
            }
        ));
        assert_eq!(rules[1].trigger, Trigger::Unsupported);
    }

    #[test]
    fn should_accept_empty_document() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn should_reject_rule_without_trigger() {
        let result = parse(
            r#"
            [[rules]]
            id = "broken"
            name = "No trigger"
            "#,
        );
        assert!(matches!(result, Err(RulesFileError::Parse(_))));
    }

    #[test]
    fn should_return_no_rules_when_file_missing() {
        let rules = load(Path::new("definitely-not-here.toml")).unwrap();
        assert!(rules.is_empty());
    }
}
