//! Field coalescing for loosely-shaped server records.
//!
//! The server does not agree with itself on field names (`filename` vs
//! `file_name`, `size` vs `file_size`). [`coalesce`] picks the first value
//! among a list of keys, in order, that is present and *truthy*:
//!
//! | JSON value | truthy when |
//! |---|---|
//! | `null` / missing | never |
//! | bool | `true` |
//! | number | non-zero |
//! | string | non-empty |
//! | array / object | always |
//!
//! Falsy values are skipped, so `{"size": 0, "file_size": 12}` coalesces to
//! `12`. Callers apply their own default when every key is falsy.

use serde_json::Value;

/// First truthy value among `keys`, in order.
pub fn coalesce<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_truthy(value))
}

/// Whether a JSON value counts as present for coalescing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value among `keys`, rendered as a string.
pub fn coalesce_string(record: &Value, keys: &[&str]) -> Option<String> {
    coalesce(record, keys).and_then(|value| match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// First truthy value among `keys`, as an unsigned integer.
///
/// Fractional numbers are truncated; numeric strings are parsed.
pub fn coalesce_u64(record: &Value, keys: &[&str]) -> Option<u64> {
    coalesce(record, keys).and_then(|value| match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// First truthy value among `keys`, as a signed integer.
pub fn coalesce_i64(record: &Value, keys: &[&str]) -> Option<i64> {
    coalesce(record, keys).and_then(|value| match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Whether any of `keys` holds a truthy value.
pub fn coalesce_bool(record: &Value, keys: &[&str]) -> bool {
    coalesce(record, keys).is_some()
}
