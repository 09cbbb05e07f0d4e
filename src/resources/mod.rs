//! API resource facades — each maps to a section of the Handwrytten API.
//!
//! Facades are thin, borrowed views over the shared transport, obtained
//! from the [`crate::Handwrytten`] client handle:
//!
//! ```rust,ignore
//! let cards = client.cards().list().await?;
//! let user = client.auth().get_user().await?;
//! ```
//!
//! They translate call patterns into requests and parse responses into
//! typed models; [`crate::ApiError`] values from the transport propagate
//! unchanged.

pub mod address_book;
pub mod auth;
pub mod basket;
pub mod cards;
pub mod custom_cards;
pub mod fonts;
pub mod gift_cards;
pub mod inserts;
pub mod orders;
pub mod qr_codes;

pub(crate) mod de;

use serde_json::Value;

/// Pulls a list out of a response that may be a bare array or an object
/// wrapping the array under one of several known keys.
pub(crate) fn extract_items(value: Value, keys: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Parses each list element through the model's tolerant constructor.
pub(crate) fn parse_items<T: de::FromValue>(value: Value, keys: &[&str]) -> Vec<T> {
    extract_items(value, keys).iter().map(T::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_from_bare_array() {
        let items = extract_items(json!([1, 2, 3]), &["results"]);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_extract_items_from_wrapped_object() {
        let items = extract_items(json!({"cards": [{"id": 1}]}), &["results", "cards"]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_items_prefers_earlier_keys() {
        let items = extract_items(
            json!({"results": [1], "cards": [2, 3]}),
            &["results", "cards"],
        );
        assert_eq!(items, vec![json!(1)]);
    }

    #[test]
    fn test_extract_items_unknown_shape_is_empty() {
        assert!(extract_items(json!("nope"), &["results"]).is_empty());
        assert!(extract_items(json!({"other": 1}), &["results"]).is_empty());
    }
}
