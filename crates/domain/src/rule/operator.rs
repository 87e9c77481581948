//! Operator: how a condition trigger compares an event field to its value.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Comparison applied by a [`Trigger::Condition`](super::Trigger::Condition).
///
/// Names are accepted in snake_case or camelCase (`greater_than` or
/// `greaterThan`). Any other name deserializes to [`Operator::Unknown`],
/// which never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Strict equality. Numbers compare by value (`5 == 5.0`), everything
    /// else compares without coercion.
    Equals,
    /// Numeric `actual > expected`. Non-numbers never match.
    #[serde(alias = "greaterThan")]
    GreaterThan,
    /// Numeric `actual < expected`. Non-numbers never match.
    #[serde(alias = "lessThan")]
    LessThan,
    /// Substring test on the string forms of both sides.
    Contains,
    /// Unrecognised operator.
    #[serde(other)]
    Unknown,
}

impl Operator {
    /// Compare an event field value against the trigger's expected value.
    #[must_use]
    pub fn apply(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::Equals => match compare_numbers(actual, expected) {
                Some(ordering) => ordering == Ordering::Equal,
                None => actual == expected,
            },
            Self::GreaterThan => compare_numbers(actual, expected) == Some(Ordering::Greater),
            Self::LessThan => compare_numbers(actual, expected) == Some(Ordering::Less),
            Self::Contains => {
                let expected = coerce_to_string(expected);
                coerce_to_string(actual).contains(&*expected)
            }
            Self::Unknown => false,
        }
    }
}

/// Order two JSON numbers. Integers compare exactly; as soon as one side is
/// a float both are compared as `f64`. `None` unless both are numbers.
fn compare_numbers(actual: &Value, expected: &Value) -> Option<Ordering> {
    let (Value::Number(a), Value::Number(b)) = (actual, expected) else {
        return None;
    };
    match (as_integer(a), as_integer(b)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn coerce_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Equals => "equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Contains => "contains",
            Self::Unknown => "unknown",
        })
    }
}
