//! Recipient and sender resolution with override precedence.
//!
//! [`resolve`] turns the heterogeneous recipient inputs a caller may supply
//! into a fully wire-ready sequence of entries, applying per-entry
//! `message`/`wishes`/`sender` overrides with call-level defaults filling
//! the gaps. Explicit per-entry values always win; flattened defaults never
//! clobber an explicit override.

use serde_json::{Map, Value};

use crate::address::flatten::{flatten, Role};
use crate::address::{Address, AddressError};

/// A recipient in any of the accepted forms.
///
/// Resolution is an exhaustive match over this closed union; there is no
/// runtime type inspection beyond the [`TryFrom<Value>`] entry point, which
/// rejects unsupported JSON shapes before any request is issued.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    /// A previously saved address-book id.
    Saved(u64),
    /// A friendly field mapping (`firstName`, `street1`, ...), optionally
    /// carrying `message`/`wishes`/`sender` per-entry overrides.
    Fields(Map<String, Value>),
    /// A mapping already in wire form (`to_*` keys or `address_id`);
    /// passed through without flattening.
    Wire(Map<String, Value>),
}

impl Recipient {
    /// Classifies a mapping as wire form or friendly fields.
    ///
    /// Wire form is detected by the presence of at least one `to_`-prefixed
    /// key or an `address_id` key.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        let is_wire = map
            .keys()
            .any(|key| key.starts_with("to_") || key == "address_id");
        if is_wire {
            Self::Wire(map)
        } else {
            Self::Fields(map)
        }
    }
}

impl From<u64> for Recipient {
    fn from(id: u64) -> Self {
        Self::Saved(id)
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Self::Fields(address.to_friendly())
    }
}

impl TryFrom<Value> for Recipient {
    type Error = AddressError;

    /// Accepts an integer saved-address id or a mapping. Anything else
    /// (floats, booleans, strings, arrays) is a caller error.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => n.as_u64().map(Self::Saved).ok_or_else(|| {
                AddressError::InvalidRecipient {
                    got: format!("number {n}"),
                }
            }),
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(AddressError::InvalidRecipient {
                got: json_type_name(&other).to_string(),
            }),
        }
    }
}

/// A return address in any of the accepted forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Sender {
    /// A previously saved return-address id.
    Saved(u64),
    /// A friendly field mapping, flattened with the `from_` prefix.
    Fields(Map<String, Value>),
}

impl From<u64> for Sender {
    fn from(id: u64) -> Self {
        Self::Saved(id)
    }
}

impl From<Address> for Sender {
    fn from(address: Address) -> Self {
        Self::Fields(address.to_friendly())
    }
}

impl TryFrom<Value> for Sender {
    type Error = AddressError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => {
                n.as_u64()
                    .map(Self::Saved)
                    .ok_or_else(|| AddressError::InvalidSender {
                        got: format!("number {n}"),
                    })
            }
            Value::Object(map) => Ok(Self::Fields(map)),
            other => Err(AddressError::InvalidSender {
                got: json_type_name(&other).to_string(),
            }),
        }
    }
}

/// Call-level defaults applied to recipients that don't carry their own
/// overrides.
#[derive(Debug, Clone, Default)]
pub struct OrderDefaults {
    /// Default message body.
    pub message: Option<String>,
    /// Default closing/wishes.
    pub wishes: Option<String>,
    /// Default return address.
    pub sender: Option<Sender>,
}

/// The output of [`resolve`]: wire-ready recipient entries plus an optional
/// request-level saved return-address id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecipients {
    /// One wire mapping per input recipient, in order.
    pub entries: Vec<Map<String, Value>>,
    /// Set when the call-level sender was a saved id: it becomes a single
    /// request parameter rather than per-entry fields.
    pub return_address_id: Option<u64>,
}

/// Resolves recipients against call-level defaults.
///
/// For each entry, in order:
///
/// 1. per-entry `message`/`wishes`/`sender` are extracted before the
///    remaining address fields are flattened;
/// 2. a missing `message`/`wishes` inherits the call-level default;
/// 3. a per-entry integer sender becomes `return_address_id` on that entry,
///    a structured one is flattened to `from_*` fields;
/// 4. a structured call-level sender is merged only into entries that carry
///    neither `from_*` fields nor a `return_address_id`.
///
/// # Errors
///
/// Returns [`AddressError::InvalidSender`] for an unsupported per-entry
/// sender shape, or [`AddressError::MissingMessage`] when an entry ends up
/// with no message at all. Either aborts before any network call.
pub fn resolve(
    recipients: &[Recipient],
    defaults: &OrderDefaults,
) -> Result<ResolvedRecipients, AddressError> {
    let (return_address_id, default_sender_fields) = match &defaults.sender {
        Some(Sender::Saved(id)) => (Some(*id), None),
        Some(Sender::Fields(map)) => (None, Some(flatten(map, Role::From))),
        None => (None, None),
    };

    let mut entries = Vec::with_capacity(recipients.len());
    for (index, recipient) in recipients.iter().enumerate() {
        let mut entry = match recipient {
            Recipient::Saved(id) => {
                let mut entry = Map::new();
                entry.insert("address_id".to_string(), Value::from(*id));
                entry
            }
            Recipient::Fields(map) | Recipient::Wire(map) => {
                let mut remaining = map.clone();
                let message = remaining.remove("message").filter(|v| !v.is_null());
                let wishes = remaining.remove("wishes").filter(|v| !v.is_null());
                let sender = remaining.remove("sender").filter(|v| !v.is_null());

                let mut entry = if matches!(recipient, Recipient::Wire(_)) {
                    remaining
                } else {
                    flatten(&remaining, Role::To)
                };

                if let Some(message) = message {
                    entry.insert("message".to_string(), message);
                }
                if let Some(wishes) = wishes {
                    entry.insert("wishes".to_string(), wishes);
                }
                if let Some(sender) = sender {
                    match Sender::try_from(sender)? {
                        Sender::Saved(id) => {
                            entry.insert("return_address_id".to_string(), Value::from(id));
                        }
                        Sender::Fields(map) => {
                            for (key, value) in flatten(&map, Role::From) {
                                entry.insert(key, value);
                            }
                        }
                    }
                }
                entry
            }
        };

        if !entry.contains_key("message") {
            if let Some(message) = &defaults.message {
                entry.insert("message".to_string(), Value::String(message.clone()));
            }
        }
        if !entry.contains_key("wishes") {
            if let Some(wishes) = &defaults.wishes {
                entry.insert("wishes".to_string(), Value::String(wishes.clone()));
            }
        }

        // A flattened default sender never clobbers an explicit override.
        if let Some(fields) = &default_sender_fields {
            let has_own_sender = entry.contains_key("return_address_id")
                || entry.keys().any(|key| key.starts_with("from_"));
            if !has_own_sender {
                for (key, value) in fields {
                    entry.insert(key.clone(), value.clone());
                }
            }
        }

        if !entry.contains_key("message") {
            return Err(AddressError::MissingMessage { index });
        }

        entries.push(entry);
    }

    Ok(ResolvedRecipients {
        entries,
        return_address_id,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
