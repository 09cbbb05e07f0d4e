//! Tolerant field extraction for loosely-typed API responses.
//!
//! The upstream API is inconsistent about key names (`title` vs `name`,
//! `id` vs `uid`) and about representing ids as numbers or strings,
//! sometimes within one endpoint. Response models are therefore built by
//! picking the first present, non-null key from a candidate list and
//! coercing scalars, rather than relying on a fixed serde shape.

use serde_json::Value;

/// A type constructible from a (possibly messy) response value.
pub(crate) trait FromValue {
    fn from_value(value: &Value) -> Self;
}

fn pick<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    keys.iter()
        .find_map(|key| map.get(*key))
        .filter(|v| !v.is_null())
}

/// First present key coerced to a string; numbers stringify. Defaults to
/// the empty string.
pub(crate) fn string_at(value: &Value, keys: &[&str]) -> String {
    opt_string_at(value, keys).unwrap_or_default()
}

/// First present key coerced to a string, or `None`.
pub(crate) fn opt_string_at(value: &Value, keys: &[&str]) -> Option<String> {
    match pick(value, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present key coerced to a u64; numeric strings parse. Defaults
/// to zero.
pub(crate) fn u64_at(value: &Value, keys: &[&str]) -> u64 {
    opt_u64_at(value, keys).unwrap_or_default()
}

/// First present key coerced to a u64, or `None`.
pub(crate) fn opt_u64_at(value: &Value, keys: &[&str]) -> Option<u64> {
    match pick(value, keys)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// First present key coerced to an f64, or `None`.
pub(crate) fn opt_f64_at(value: &Value, keys: &[&str]) -> Option<f64> {
    match pick(value, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_present_key_wins() {
        let value = json!({"title": "Thank You", "name": "ignored"});
        assert_eq!(string_at(&value, &["title", "name"]), "Thank You");
        assert_eq!(string_at(&value, &["name", "title"]), "ignored");
    }

    #[test]
    fn test_null_keys_are_skipped() {
        let value = json!({"title": null, "name": "fallback"});
        assert_eq!(string_at(&value, &["title", "name"]), "fallback");
    }

    #[test]
    fn test_numbers_stringify() {
        let value = json!({"id": 3404});
        assert_eq!(string_at(&value, &["id"]), "3404");
    }

    #[test]
    fn test_numeric_strings_parse_as_u64() {
        let value = json!({"id": "42"});
        assert_eq!(u64_at(&value, &["id"]), 42);
        assert_eq!(opt_u64_at(&json!({}), &["id"]), None);
    }

    #[test]
    fn test_f64_from_either_form() {
        assert_eq!(opt_f64_at(&json!({"credits": 12.5}), &["credits"]), Some(12.5));
        assert_eq!(opt_f64_at(&json!({"credits": "2.5"}), &["credits"]), Some(2.5));
        assert_eq!(opt_f64_at(&json!({"credits": []}), &["credits"]), None);
    }

    #[test]
    fn test_missing_and_non_object_default() {
        assert_eq!(string_at(&json!("scalar"), &["id"]), "");
        assert_eq!(u64_at(&json!({"other": 1}), &["id"]), 0);
    }
}
