//! Inspection helpers over record values.
//!
//! Rules see a value as `Option<&Value>`: `None` is a missing key, and
//! `Some(Value::Null)` is an explicit null. Both count as absent for every
//! rule that treats absence vacuously.

use serde_json::Value;

/// Type tag reported for a missing value.
pub const UNDEFINED: &str = "undefined";

/// Returns true for a missing value or an explicit null.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Returns the runtime type tag compared by the type rule.
///
/// Tags are `undefined`, `null`, `boolean`, `number`, `string`, `array`
/// and `object`.
pub fn type_tag(value: Option<&Value>) -> &'static str {
    match value {
        None => UNDEFINED,
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Returns the length of a string (in chars) or an array (in elements).
///
/// Every other value has no length.
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Renders a value as text for presence and pattern checks.
///
/// Strings are used verbatim rather than JSON-quoted. Arrays join their
/// elements with `,`, rendering null elements as empty, so `[]` and `[" "]`
/// both read as blank.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
