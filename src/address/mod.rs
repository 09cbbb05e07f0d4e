//! Address normalization for orders.
//!
//! The Handwrytten API expects recipient and return addresses as flat,
//! role-prefixed fields (`to_first_name`, `from_address1`, ...). Callers
//! work in friendlier terms: an [`Address`] value, a friendly field mapping
//! (`firstName`, `street1`, ...), a saved address-book id, or a free-text
//! line like `"Jane Doe, 123 Main St, Phoenix AZ 85001"`.
//!
//! This module converts between those forms:
//!
//! - [`flatten`]: friendly mapping + role prefix → wire mapping, with
//!   absent/empty values omitted
//! - [`Recipient`] / [`Sender`]: closed unions over the accepted input
//!   shapes, resolved by exhaustive match
//! - [`resolve`]: per-recipient override resolution with call-level
//!   defaults (message, wishes, sender)
//! - [`parse_address`] / [`normalize_csv_row`]: free-text and CSV input
//!   parsing with heuristic field disambiguation
//!
//! Resolution is pure: caller-supplied structures are never mutated, and a
//! malformed input aborts before any request is issued.

mod flatten;
mod parser;
mod resolve;

pub use flatten::{flatten, Role};
pub use parser::{normalize_csv_row, parse_address};
pub use resolve::{resolve, OrderDefaults, Recipient, ResolvedRecipients, Sender};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while resolving or parsing addresses.
///
/// All of these are caller-usage errors: they are raised locally, before
/// any network call, and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A free-text address could not be parsed.
    #[error("Cannot parse address '{input}': {reason}")]
    Parse {
        /// The input that failed to parse.
        input: String,
        /// Why it failed.
        reason: String,
    },

    /// A recipient entry had an unsupported shape.
    #[error("Each recipient must be a saved address id, an address mapping, or an Address; got {got}")]
    InvalidRecipient {
        /// A short description of the rejected value.
        got: String,
    },

    /// A sender had an unsupported shape.
    #[error("A sender must be a saved address id, an address mapping, or an Address; got {got}")]
    InvalidSender {
        /// A short description of the rejected value.
        got: String,
    },

    /// A resolved recipient ended up with neither its own message nor an
    /// inherited default.
    #[error("Recipient {index} has no message and no default message was given")]
    MissingMessage {
        /// Zero-based index of the recipient in the input sequence.
        index: usize,
    },
}

/// A mail address, used for both recipients and return (sender) addresses.
///
/// `street1` is required; `street2` and `company` are optional; the country
/// defaults to `"US"`.
///
/// # Example
///
/// ```rust
/// use handwrytten::Address;
///
/// let address = Address::new("Jane", "Doe", "123 Main St", "Phoenix", "AZ", "85001")
///     .street2("Apt 4B")
///     .company("Acme Inc");
/// assert_eq!(address.country, "US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address line 1.
    pub street1: String,
    /// Street address line 2.
    pub street2: Option<String>,
    /// City.
    pub city: String,
    /// State/province code.
    pub state: String,
    /// ZIP/postal code.
    pub zip: String,
    /// Business/company name.
    pub company: Option<String>,
    /// Country code.
    pub country: String,
}

impl Address {
    /// Creates an address from the required fields, with country `"US"`.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        street1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            street1: street1.into(),
            street2: None,
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            company: None,
            country: "US".to_string(),
        }
    }

    /// Sets the second street line.
    #[must_use]
    pub fn street2(mut self, street2: impl Into<String>) -> Self {
        self.street2 = Some(street2.into());
        self
    }

    /// Sets the company name.
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Overrides the country code.
    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Converts this address to its friendly field mapping
    /// (`firstName`, `street1`, ...). Unset optional fields are omitted.
    #[must_use]
    pub fn to_friendly(&self) -> Map<String, Value> {
        let pairs: [(&str, Option<&str>); 9] = [
            ("firstName", Some(&self.first_name)),
            ("lastName", Some(&self.last_name)),
            ("street1", Some(&self.street1)),
            ("street2", self.street2.as_deref()),
            ("city", Some(&self.city)),
            ("state", Some(&self.state)),
            ("zip", Some(&self.zip)),
            ("company", self.company.as_deref()),
            ("country", Some(&self.country)),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| {
                value.map(|v| (key.to_string(), Value::String(v.to_string())))
            })
            .collect()
    }
}
