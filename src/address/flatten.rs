//! Friendly-to-wire address flattening.

use serde_json::{Map, Value};

/// Which side of the envelope an address belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Recipient fields (`to_*`).
    To,
    /// Return-address fields (`from_*`).
    From,
}

impl Role {
    /// Returns the wire prefix for this role.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::To => "to",
            Self::From => "from",
        }
    }
}

/// Friendly key → wire suffix renames. Keys not listed pass through
/// unchanged (city, state, zip, country).
const FRIENDLY_TO_WIRE: [(&str, &str); 5] = [
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("street1", "address1"),
    ("street2", "address2"),
    ("company", "business_name"),
];

fn wire_suffix(key: &str) -> &str {
    FRIENDLY_TO_WIRE
        .iter()
        .find(|(friendly, _)| *friendly == key)
        .map_or(key, |(_, wire)| wire)
}

/// A value that counts as absent on the wire: omission, not null-valued
/// presence, is the contract.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Flattens a friendly address mapping into role-prefixed wire fields.
///
/// Each known friendly key is renamed through the fixed lookup table and
/// prefixed with the role (`firstName` → `to_first_name`); unknown keys
/// keep their name under the prefix. Entries whose value is null or an
/// empty string are dropped. The result is built as an explicit ordered
/// list of pairs, filtered before the wire mapping is constructed.
///
/// # Example
///
/// ```rust
/// use handwrytten::address::{flatten, Role};
/// use serde_json::{json, Map, Value};
///
/// let friendly: Map<String, Value> = json!({
///     "firstName": "Jane",
///     "street1": "123 Main St",
///     "street2": "",
/// })
/// .as_object()
/// .unwrap()
/// .clone();
///
/// let wire = flatten(&friendly, Role::To);
/// assert_eq!(wire["to_first_name"], "Jane");
/// assert_eq!(wire["to_address1"], "123 Main St");
/// assert!(!wire.contains_key("to_address2"));
/// ```
#[must_use]
pub fn flatten(fields: &Map<String, Value>, role: Role) -> Map<String, Value> {
    let pairs: Vec<(String, Value)> = fields
        .iter()
        .filter(|(_, value)| !is_absent(value))
        .map(|(key, value)| {
            (
                format!("{}_{}", role.prefix(), wire_suffix(key)),
                value.clone(),
            )
        })
        .collect();

    pairs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn friendly(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_flatten_renames_known_keys() {
        let wire = flatten(
            &friendly(json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "street1": "123 Main St",
                "street2": "Apt 4B",
                "company": "Acme Inc",
            })),
            Role::To,
        );

        assert_eq!(wire["to_first_name"], "Jane");
        assert_eq!(wire["to_last_name"], "Doe");
        assert_eq!(wire["to_address1"], "123 Main St");
        assert_eq!(wire["to_address2"], "Apt 4B");
        assert_eq!(wire["to_business_name"], "Acme Inc");
    }

    #[test]
    fn test_flatten_passes_unknown_keys_through() {
        let wire = flatten(
            &friendly(json!({"city": "Phoenix", "state": "AZ", "zip": "85001"})),
            Role::To,
        );

        assert_eq!(wire["to_city"], "Phoenix");
        assert_eq!(wire["to_state"], "AZ");
        assert_eq!(wire["to_zip"], "85001");
    }

    #[test]
    fn test_flatten_from_prefix() {
        let wire = flatten(&friendly(json!({"firstName": "David"})), Role::From);
        assert_eq!(wire["from_first_name"], "David");
    }

    #[test]
    fn test_flatten_omits_null_and_empty() {
        let wire = flatten(
            &friendly(json!({
                "firstName": "Jane",
                "street2": "",
                "company": null,
            })),
            Role::To,
        );

        assert_eq!(wire.len(), 1);
        assert!(wire.contains_key("to_first_name"));
        assert!(!wire.contains_key("to_address2"));
        assert!(!wire.contains_key("to_business_name"));
    }

    #[test]
    fn test_flatten_spec_example() {
        let wire = flatten(
            &friendly(json!({
                "firstName": "Jane",
                "street1": "123 Main St",
                "city": "Phoenix",
                "state": "AZ",
                "zip": "85001",
            })),
            Role::To,
        );

        assert_eq!(wire["to_first_name"], "Jane");
        assert_eq!(wire["to_address1"], "123 Main St");
        assert!(!wire.contains_key("to_address2"));
    }
}
