//! Classification of values against Fluidinfo's primitive types.

use serde_json::Value;

/// Whether the store accepts `value` as a bare primitive: a number, string,
/// boolean, null, or a set expressed as a list of strings (the empty list
/// counts). Mixed-type lists and objects need a full JSON envelope.
///
/// Used only to pick a fallback content type for tag-value writes; it never
/// rejects data on its own.
pub fn is_primitive(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        Value::Object(_) => false,
    }
}
