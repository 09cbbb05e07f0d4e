//! Manage saved addresses, countries, and states.
//!
//! Saved addresses are used with orders by passing their ids as recipients
//! or senders instead of inline fields.
//!
//! # Example
//!
//! ```rust,ignore
//! let sender_id = client
//!     .address_book()
//!     .add_sender(NewSender::from_address(
//!         Address::new("David", "Wachs", "100 S Mill Ave", "Tempe", "AZ", "85281"),
//!     ))
//!     .await?;
//!
//! let order = SendOrder::new(12345, "hwDavid")
//!     .message("Hello!")
//!     .sender(sender_id)
//!     .recipient(67890);
//! client.orders().send(order).await?;
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::address::Address;
use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::parse_items;

/// A saved address from the account's address book (recipient or sender).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavedAddress {
    /// Saved address id.
    pub id: u64,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Business/company name.
    pub company: Option<String>,
    /// Street address line 1.
    pub street1: Option<String>,
    /// Street address line 2.
    pub street2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State/province code.
    pub state: Option<String>,
    /// ZIP/postal code.
    pub zip: Option<String>,
    /// Country code.
    pub country: Option<String>,
}

impl FromValue for SavedAddress {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::u64_at(value, &["id"]),
            first_name: de::opt_string_at(value, &["first_name"]),
            last_name: de::opt_string_at(value, &["last_name"]),
            company: de::opt_string_at(value, &["business_name"]),
            street1: de::opt_string_at(value, &["address1"]),
            street2: de::opt_string_at(value, &["address2"]),
            city: de::opt_string_at(value, &["city"]),
            // Some responses misname this field in the plural.
            state: de::opt_string_at(value, &["state", "states"]),
            zip: de::opt_string_at(value, &["zip"]),
            country: de::opt_string_at(value, &["country"]),
        }
    }
}

impl fmt::Display for SavedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{name}, {}, {}, {} {}",
            self.street1.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
            self.zip.as_deref().unwrap_or_default(),
        )
    }
}

/// A supported country.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Country {
    /// Country code.
    pub code: String,
    /// Country name.
    pub name: String,
}

impl FromValue for Country {
    fn from_value(value: &Value) -> Self {
        Self {
            code: de::string_at(value, &["code", "id"]),
            name: de::string_at(value, &["name"]),
        }
    }
}

/// A state/province.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct State {
    /// State/province code.
    pub code: String,
    /// State/province name.
    pub name: String,
}

impl FromValue for State {
    fn from_value(value: &Value) -> Self {
        Self {
            code: de::string_at(value, &["code", "abbreviation"]),
            name: de::string_at(value, &["name"]),
        }
    }
}

/// Fields for saving a new recipient address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRecipient {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address line 1.
    #[serde(rename = "address1")]
    pub street1: String,
    /// City.
    pub city: String,
    /// State/province code.
    pub state: String,
    /// ZIP/postal code.
    pub zip: String,
    /// Street address line 2.
    #[serde(rename = "address2", skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    /// Business/company name.
    #[serde(rename = "business_name", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Country id (defaults server-side to US).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    /// Birthday (e.g. `"01/15/1990"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Anniversary date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<String>,
    /// Allow addresses with poor formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_poor: Option<bool>,
}

impl NewRecipient {
    /// Creates the required fields; optional ones can be set directly.
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
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            ..Self::default()
        }
    }

    /// Builds the required fields from an [`Address`].
    #[must_use]
    pub fn from_address(address: Address) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            street1: address.street1,
            city: address.city,
            state: address.state,
            zip: address.zip,
            street2: address.street2,
            company: address.company,
            ..Self::default()
        }
    }
}

/// Partial fields for updating a saved recipient. Omitted fields remain
/// unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecipientUpdate {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Street address line 1.
    #[serde(rename = "address1", skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State/province code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ZIP/postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Street address line 2.
    #[serde(rename = "address2", skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    /// Business/company name.
    #[serde(rename = "business_name", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Country id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    /// Birthday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Anniversary date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<String>,
    /// Allow addresses with poor formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_poor: Option<bool>,
}

/// Fields for saving a new sender (return) address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSender {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address line 1.
    #[serde(rename = "address1")]
    pub street1: String,
    /// City.
    pub city: String,
    /// State/province code.
    pub state: String,
    /// ZIP/postal code.
    pub zip: String,
    /// Street address line 2.
    #[serde(rename = "address2", skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    /// Business/company name.
    #[serde(rename = "business_name", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Country id (defaults server-side to US).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    /// Set as the default return address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Allow addresses with poor formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_poor: Option<bool>,
}

impl NewSender {
    /// Creates the required fields; optional ones can be set directly.
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
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            ..Self::default()
        }
    }

    /// Builds the required fields from an [`Address`].
    #[must_use]
    pub fn from_address(address: Address) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            street1: address.street1,
            city: address.city,
            state: address.state,
            zip: address.zip,
            street2: address.street2,
            company: address.company,
            ..Self::default()
        }
    }
}

/// Address book endpoints, obtained from
/// [`Handwrytten::address_book`](crate::Handwrytten::address_book).
#[derive(Debug, Clone, Copy)]
pub struct AddressBook<'a> {
    pub(crate) http: &'a HttpClient,
}

impl AddressBook<'_> {
    /// Lists saved recipient addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list_recipients(&self) -> Result<Vec<SavedAddress>, ApiError> {
        let data = self.http.get("profile/recipientsList", None).await?;
        Ok(parse_items(data, &["addresses"]))
    }

    /// Saves a new recipient address, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn add_recipient(&self, recipient: NewRecipient) -> Result<u64, ApiError> {
        let body = serde_json::to_value(&recipient).unwrap_or_default();
        let data = self.http.post("profile/addRecipient", body, None).await?;
        Ok(saved_address_id(&data, 0))
    }

    /// Updates an existing recipient address. Only the set fields change;
    /// the rest remain as saved.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn update_recipient(
        &self,
        address_id: u64,
        update: RecipientUpdate,
    ) -> Result<u64, ApiError> {
        let mut body = serde_json::to_value(&update).unwrap_or_default();
        body["id"] = Value::from(address_id);
        let data = self.http.put("profile/updateRecipient", body).await?;
        Ok(saved_address_id(&data, address_id))
    }

    /// Lists saved sender (return) addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list_senders(&self) -> Result<Vec<SavedAddress>, ApiError> {
        let data = self.http.get("profile/listAddresses", None).await?;
        // The response key is misspelled upstream ("addressses"); accept
        // the corrected spelling as well in case it is ever fixed.
        Ok(parse_items(data, &["addressses", "addresses"]))
    }

    /// Saves a new sender (return) address, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn add_sender(&self, sender: NewSender) -> Result<u64, ApiError> {
        let body = serde_json::to_value(&sender).unwrap_or_default();
        let data = self.http.post("profile/createAddress", body, None).await?;
        Ok(saved_address_id(&data, 0))
    }

    /// Gets all supported countries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        let data = self.http.get("countries/list", None).await?;
        Ok(parse_items(data, &["results", "countries"]))
    }

    /// Gets states/provinces for a country.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn states(&self, country_code: &str) -> Result<Vec<State>, ApiError> {
        let data = self
            .http
            .get(
                "states/list",
                Some(vec![("country".to_string(), country_code.to_string())]),
            )
            .await?;
        Ok(parse_items(data, &["results", "states"]))
    }
}

/// Pulls the saved-address id out of a create/update response, which may
/// nest the record under `address`.
fn saved_address_id(data: &Value, fallback: u64) -> u64 {
    let record = data.get("address").unwrap_or(data);
    de::opt_u64_at(record, &["id", "address_id"]).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saved_address_tolerates_misspelled_state_key() {
        let address = SavedAddress::from_value(&json!({"id": 1, "states": "AZ"}));
        assert_eq!(address.state.as_deref(), Some("AZ"));
    }

    #[test]
    fn test_saved_address_display() {
        let address = SavedAddress::from_value(&json!({
            "id": 1,
            "first_name": "Jane",
            "last_name": "Doe",
            "address1": "123 Main St",
            "city": "Phoenix",
            "state": "AZ",
            "zip": "85001",
        }));
        assert_eq!(address.to_string(), "Jane Doe, 123 Main St, Phoenix, AZ 85001");
    }

    #[test]
    fn test_new_recipient_serializes_wire_names() {
        let recipient = NewRecipient {
            street2: Some("Apt 4B".to_string()),
            company: Some("Acme Inc".to_string()),
            ..NewRecipient::new("Jane", "Doe", "123 Main St", "Phoenix", "AZ", "85001")
        };
        let body = serde_json::to_value(&recipient).unwrap();

        assert_eq!(body["address1"], "123 Main St");
        assert_eq!(body["address2"], "Apt 4B");
        assert_eq!(body["business_name"], "Acme Inc");
        assert!(body.get("street1").is_none());
        assert!(body.get("birthday").is_none());
    }

    #[test]
    fn test_saved_address_id_nested_and_flat() {
        assert_eq!(saved_address_id(&json!({"address": {"id": 7}}), 0), 7);
        assert_eq!(saved_address_id(&json!({"address_id": "9"}), 0), 9);
        assert_eq!(saved_address_id(&json!({}), 3), 3);
    }
}
