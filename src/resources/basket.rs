//! Multi-step basket/cart workflow for complex orders.
//!
//! Workflow:
//!
//! 1. Add one or more orders to the basket with [`Basket::add_order`].
//! 2. Submit the basket for processing with [`Basket::send`].
//!
//! [`Orders::send`](crate::resources::orders::Orders::send) wraps both
//! steps for the common case.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::address::{flatten, Role};
use crate::clients::{ApiError, HttpClient};
use crate::resources::de;

/// Parameters for adding one order to the basket (`orders/placeBasket`).
///
/// Recipients go in **one** of:
///
/// - [`addresses`](Self::addresses): mappings with friendly keys
///   (`firstName`, `street1`, ...) or raw `to_*` keys. Friendly keys are
///   converted to wire form automatically; wire maps pass through.
/// - [`address_ids`](Self::address_ids): saved address-book ids.
///
/// All optional fields are omitted from the request body when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaceOrder {
    /// Id of the card/stationery to use.
    pub card_id: u64,
    /// The handwritten message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Right-shifted closing part of the note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wishes: Option<String>,
    /// Font label (e.g. `"hwDavid"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Enable automatic font sizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_font_size: Option<bool>,
    /// Text alignment — `"left"` or `"center"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_align: Option<String>,
    /// Recipient address mappings; converted to wire form before sending.
    #[serde(skip)]
    pub addresses: Option<Vec<Map<String, Value>>>,
    /// Saved address ids for recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_ids: Option<Vec<u64>>,
    /// Saved return-address id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address_id: Option<u64>,
    /// Gift card denomination id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denomination_id: Option<u64>,
    /// Insert item id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<u64>,
    /// Signature id for the wishes section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_id: Option<u64>,
    /// Signature id for the main message block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature2_id: Option<u64>,
    /// Scheduled send date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_send: Option<String>,
    /// Promotional coupon code.
    #[serde(rename = "couponCode", skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// Verify card stock availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_quantity: Option<bool>,
    /// Verify insert stock availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_quantity_inserts: Option<bool>,
    /// Request delivery confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_confirmation: Option<bool>,
    /// Shipping method id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method_id: Option<u64>,
    /// Shipping rate id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_rate_id: Option<u64>,
    /// Shipping address id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_id: Option<u64>,
    /// Date the card must arrive by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_deliver_by: Option<String>,
    /// Metadata string for tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_metadata: Option<String>,
    /// Suppress warnings about unmatched merge fields in message/wishes.
    /// The wire name carries an upstream misspelling.
    #[serde(rename = "supressWarnings", skip_serializing_if = "Option::is_none")]
    pub suppress_warnings: Option<bool>,
}

impl PlaceOrder {
    /// Creates an order for the given card; all other fields start unset.
    #[must_use]
    pub fn new(card_id: u64) -> Self {
        Self {
            card_id,
            ..Self::default()
        }
    }
}

/// Parameters for submitting the basket (`basket/send`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct BasketSend {
    /// Promotional coupon code.
    #[serde(rename = "couponCode", skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// Id of the credit card on file to charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<u64>,
    /// If set, should match the account's test-mode setting. Sent as an
    /// integer, as the API expects.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "bool_as_int"
    )]
    pub test_mode: Option<bool>,
    /// Check stock; the API errors when insufficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_quantity: Option<bool>,
    /// Validate recipient addresses before submitting. If `false`, the
    /// address is checked after purchase and credits are refunded when it
    /// fails. Sent as an integer, as the API expects.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "bool_as_int"
    )]
    pub check_cass_before_submit: Option<bool>,
    /// Order-id → note mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Map<String, Value>>,
    /// Expected payment breakdown (`coupon`, `credit1`, `credit2`, `money`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_structure: Option<Map<String, Value>>,
}

fn bool_as_int<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}

/// Basket endpoints, obtained from
/// [`Handwrytten::basket`](crate::Handwrytten::basket).
#[derive(Debug, Clone, Copy)]
pub struct Basket<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Basket<'_> {
    /// Adds an order to the basket.
    ///
    /// Friendly address mappings are converted to wire form here,
    /// preserving any per-entry `message`/`wishes` carried alongside the
    /// address fields; wire maps pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn add_order(&self, order: PlaceOrder) -> Result<Value, ApiError> {
        let addresses = order.addresses.clone();
        let mut body = serde_json::to_value(&order).unwrap_or_else(|_| json!({}));

        if let Some(addresses) = addresses {
            let converted: Vec<Value> = addresses
                .into_iter()
                .map(|address| Value::Object(to_wire_address(address)))
                .collect();
            body["addresses"] = Value::Array(converted);
        }

        self.http.post("orders/placeBasket", body, None).await
    }

    /// Removes a single item from the basket by the id returned from
    /// [`Basket::add_order`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn remove(&self, basket_id: u64) -> Result<Value, ApiError> {
        self.http
            .post("basket/remove", json!({"id": basket_id}), None)
            .await
    }

    /// Removes all items from the basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn clear(&self) -> Result<Value, ApiError> {
        self.http.post("basket/clear", json!({}), None).await
    }

    /// Lists all items currently in the basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.http.get("basket/allNew", None).await
    }

    /// Gets a single basket item by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn get_item(&self, basket_id: u64) -> Result<Value, ApiError> {
        self.http
            .get(
                "basket/item",
                Some(vec![("id".to_string(), basket_id.to_string())]),
            )
            .await
    }

    /// Gets the number of items currently in the basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn count(&self) -> Result<u64, ApiError> {
        let data = self.http.get("basket/count", None).await?;
        Ok(de::u64_at(&data, &["count"]))
    }

    /// Submits the basket for processing. Call after adding orders with
    /// [`Basket::add_order`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn send(&self, send: BasketSend) -> Result<Value, ApiError> {
        let body = serde_json::to_value(&send).unwrap_or_else(|_| json!({}));
        self.http.post("basket/send", body, None).await
    }
}

/// Converts one recipient mapping to wire form. Mappings already carrying
/// a `to_*` key or `address_id` pass through unchanged.
fn to_wire_address(address: Map<String, Value>) -> Map<String, Value> {
    let is_wire = address
        .keys()
        .any(|key| key.starts_with("to_") || key == "address_id");
    if is_wire {
        return address;
    }

    let mut remaining = address;
    let message = remaining.remove("message").filter(|v| !v.is_null());
    let wishes = remaining.remove("wishes").filter(|v| !v.is_null());

    let mut row = flatten(&remaining, Role::To);
    if let Some(message) = message {
        row.insert("message".to_string(), message);
    }
    if let Some(wishes) = wishes {
        row.insert("wishes".to_string(), wishes);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_place_order_serializes_wire_names() {
        let order = PlaceOrder {
            coupon_code: Some("SAVE10".to_string()),
            suppress_warnings: Some(true),
            ..PlaceOrder::new(3404)
        };
        let body = serde_json::to_value(&order).unwrap();

        assert_eq!(body["card_id"], 3404);
        assert_eq!(body["couponCode"], "SAVE10");
        assert_eq!(body["supressWarnings"], true);
        assert!(body.get("message").is_none());
        assert!(body.get("addresses").is_none());
    }

    #[test]
    fn test_basket_send_encodes_flags_as_ints() {
        let send = BasketSend {
            test_mode: Some(true),
            check_cass_before_submit: Some(false),
            ..BasketSend::default()
        };
        let body = serde_json::to_value(&send).unwrap();

        assert_eq!(body["test_mode"], 1);
        assert_eq!(body["check_cass_before_submit"], 0);
        assert!(body.get("couponCode").is_none());
    }

    #[test]
    fn test_to_wire_address_converts_friendly_keys() {
        let row = to_wire_address(map(json!({
            "firstName": "Jane",
            "street1": "123 Main St",
            "message": "Thanks!",
        })));

        assert_eq!(row["to_first_name"], "Jane");
        assert_eq!(row["to_address1"], "123 Main St");
        assert_eq!(row["message"], "Thanks!");
        assert!(!row.contains_key("firstName"));
    }

    #[test]
    fn test_to_wire_address_passes_wire_maps_through() {
        let wire = map(json!({"to_first_name": "Jane", "message": "hi"}));
        assert_eq!(to_wire_address(wire.clone()), wire);

        let saved = map(json!({"address_id": 42}));
        assert_eq!(to_wire_address(saved.clone()), saved);
    }
}
