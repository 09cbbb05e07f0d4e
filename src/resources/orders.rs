//! Create and manage handwritten note orders.
//!
//! [`Orders::send`] is the main entry point: it resolves recipients and
//! sender through the address resolver, then runs the two-step workflow
//! `orders/placeBasket` → `basket/send`. For finer control, use
//! [`Basket::add_order`](crate::resources::basket::Basket::add_order) and
//! [`Basket::send`](crate::resources::basket::Basket::send) directly.

use serde::Serialize;
use serde_json::Value;

use crate::address::{resolve, OrderDefaults, Recipient, Sender};
use crate::clients::{ApiError, HttpClient};
use crate::resources::basket::{Basket, BasketSend, PlaceOrder};
use crate::resources::de::{self, FromValue};
use crate::resources::parse_items;

/// An order for a handwritten card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Order {
    /// Order id.
    pub id: String,
    /// Current status.
    pub status: Option<String>,
    /// The message that was written.
    pub message: Option<String>,
    /// Card id used.
    pub card_id: Option<String>,
    /// Font id used.
    pub font_id: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Tracking number, once shipped.
    pub tracking_number: Option<String>,
}

impl FromValue for Order {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id", "order_id"]),
            status: de::opt_string_at(value, &["status"]),
            message: de::opt_string_at(value, &["message"]),
            card_id: de::opt_string_at(value, &["card_id"]),
            font_id: de::opt_string_at(value, &["font_id"]),
            created_at: de::opt_string_at(value, &["created_at", "createdAt"]),
            tracking_number: de::opt_string_at(value, &["tracking_number", "trackingNumber"]),
        }
    }
}

/// A complete send request: card, font, recipients, and defaults.
///
/// Recipients may be [`Recipient`] values in any accepted form — saved ids,
/// friendly mappings, wire mappings, or [`Address`](crate::Address) values
/// — and each mapping may carry its own `message`/`wishes`/`sender`
/// overrides. The top-level message, wishes, and sender serve as defaults
/// for recipients that don't override them.
///
/// # Example
///
/// ```rust,ignore
/// let order = SendOrder::new(12345, "hwDavid")
///     .message("Thanks for being an amazing customer!")
///     .sender(Address::new("David", "Wachs", "100 S Mill Ave", "Tempe", "AZ", "85281"))
///     .recipient(Address::new("Jane", "Doe", "123 Main St", "Phoenix", "AZ", "85001"));
///
/// let confirmation = client.orders().send(order).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SendOrder {
    card_id: u64,
    font: String,
    recipients: Vec<Recipient>,
    message: Option<String>,
    wishes: Option<String>,
    sender: Option<Sender>,
    return_address_id: Option<u64>,
    message_align: Option<String>,
    denomination_id: Option<u64>,
    insert_id: Option<u64>,
    credit_card_id: Option<u64>,
    coupon_code: Option<String>,
    date_send: Option<String>,
    check_cass_before_submit: Option<bool>,
    delivery_confirmation: Option<bool>,
    client_metadata: Option<String>,
    suppress_warnings: Option<bool>,
    signature_id: Option<u64>,
    signature2_id: Option<u64>,
    font_size: Option<u32>,
    auto_font_size: Option<bool>,
}

impl SendOrder {
    /// Creates a send request for the given card and handwriting font.
    #[must_use]
    pub fn new(card_id: u64, font: impl Into<String>) -> Self {
        Self {
            card_id,
            font: font.into(),
            recipients: Vec::new(),
            message: None,
            wishes: None,
            sender: None,
            return_address_id: None,
            message_align: None,
            denomination_id: None,
            insert_id: None,
            credit_card_id: None,
            coupon_code: None,
            date_send: None,
            check_cass_before_submit: None,
            delivery_confirmation: None,
            client_metadata: None,
            suppress_warnings: None,
            signature_id: None,
            signature2_id: None,
            font_size: None,
            auto_font_size: None,
        }
    }

    /// Adds one recipient, in any accepted form.
    #[must_use]
    pub fn recipient(mut self, recipient: impl Into<Recipient>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Adds a batch of recipients.
    #[must_use]
    pub fn recipients<I, R>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Recipient>,
    {
        self.recipients.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// Sets the default message body, applied to recipients without their
    /// own `message` override.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the default closing/wishes.
    #[must_use]
    pub fn wishes(mut self, wishes: impl Into<String>) -> Self {
        self.wishes = Some(wishes.into());
        self
    }

    /// Sets the default return address. A saved id becomes a single
    /// request-level `return_address_id`; a structured address is merged
    /// into each recipient that doesn't override it.
    #[must_use]
    pub fn sender(mut self, sender: impl Into<Sender>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Saved return-address id — an alias for `sender(id)`; an explicit
    /// [`SendOrder::sender`] takes precedence.
    #[must_use]
    pub const fn return_address_id(mut self, id: u64) -> Self {
        self.return_address_id = Some(id);
        self
    }

    /// Text alignment — `"left"` or `"center"`.
    #[must_use]
    pub fn message_align(mut self, align: impl Into<String>) -> Self {
        self.message_align = Some(align.into());
        self
    }

    /// Gift card denomination id to include.
    #[must_use]
    pub const fn denomination_id(mut self, id: u64) -> Self {
        self.denomination_id = Some(id);
        self
    }

    /// Insert item id to include.
    #[must_use]
    pub const fn insert_id(mut self, id: u64) -> Self {
        self.insert_id = Some(id);
        self
    }

    /// Credit card on file to charge.
    #[must_use]
    pub const fn credit_card_id(mut self, id: u64) -> Self {
        self.credit_card_id = Some(id);
        self
    }

    /// Promotional coupon code.
    #[must_use]
    pub fn coupon_code(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    /// Scheduled send date.
    #[must_use]
    pub fn date_send(mut self, date: impl Into<String>) -> Self {
        self.date_send = Some(date.into());
        self
    }

    /// Validate recipient addresses before submitting.
    #[must_use]
    pub const fn check_cass_before_submit(mut self, check: bool) -> Self {
        self.check_cass_before_submit = Some(check);
        self
    }

    /// Request delivery confirmation.
    #[must_use]
    pub const fn delivery_confirmation(mut self, confirm: bool) -> Self {
        self.delivery_confirmation = Some(confirm);
        self
    }

    /// Metadata string for tracking.
    #[must_use]
    pub fn client_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.client_metadata = Some(metadata.into());
        self
    }

    /// Suppress warnings about unmatched merge fields.
    #[must_use]
    pub const fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.suppress_warnings = Some(suppress);
        self
    }

    /// Signature id for the wishes section.
    #[must_use]
    pub const fn signature_id(mut self, id: u64) -> Self {
        self.signature_id = Some(id);
        self
    }

    /// Signature id for the main message block.
    #[must_use]
    pub const fn signature2_id(mut self, id: u64) -> Self {
        self.signature2_id = Some(id);
        self
    }

    /// Font size in points.
    #[must_use]
    pub const fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Enable automatic font sizing.
    #[must_use]
    pub const fn auto_font_size(mut self, auto: bool) -> Self {
        self.auto_font_size = Some(auto);
        self
    }
}

/// Order endpoints, obtained from
/// [`Handwrytten::orders`](crate::Handwrytten::orders).
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Orders<'_> {
    /// Sends handwritten notes — stages the order then commits the basket.
    ///
    /// The two remote calls are strictly sequential: the commit is never
    /// issued if staging fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Address`] before any request when a recipient or
    /// sender cannot be resolved (including a recipient with no message and
    /// no default), or [`ApiError`] from either remote call.
    pub async fn send(&self, order: SendOrder) -> Result<Value, ApiError> {
        let defaults = OrderDefaults {
            message: order.message.clone(),
            wishes: order.wishes.clone(),
            sender: order
                .sender
                .clone()
                .or(order.return_address_id.map(Sender::Saved)),
        };
        let resolved = resolve(&order.recipients, &defaults)?;

        let place = PlaceOrder {
            font: Some(order.font),
            addresses: Some(resolved.entries),
            return_address_id: resolved.return_address_id,
            message_align: order.message_align,
            denomination_id: order.denomination_id,
            insert_id: order.insert_id,
            date_send: order.date_send,
            delivery_confirmation: order.delivery_confirmation,
            client_metadata: order.client_metadata,
            suppress_warnings: order.suppress_warnings,
            signature_id: order.signature_id,
            signature2_id: order.signature2_id,
            font_size: order.font_size,
            auto_font_size: order.auto_font_size,
            coupon_code: order.coupon_code.clone(),
            ..PlaceOrder::new(order.card_id)
        };

        let basket = Basket { http: self.http };
        basket.add_order(place).await?;

        basket
            .send(BasketSend {
                coupon_code: order.coupon_code,
                credit_card_id: order.credit_card_id,
                check_cass_before_submit: order.check_cass_before_submit,
                ..BasketSend::default()
            })
            .await
    }

    /// Retrieves an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get(&self, order_id: &str) -> Result<Order, ApiError> {
        let data = self
            .http
            .get(&format!("orders/get/{order_id}"), None)
            .await?;
        Ok(Order::from_value(&data))
    }

    /// Lists orders with pagination (1-indexed pages).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self, page: u32, per_page: u32) -> Result<Vec<Order>, ApiError> {
        let data = self
            .http
            .get(
                "orders/list",
                Some(vec![
                    ("page".to_string(), page.to_string()),
                    ("per_page".to_string(), per_page.to_string()),
                ]),
            )
            .await?;
        Ok(parse_items(data, &["results", "orders"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_from_value_id_fallback() {
        let order = Order::from_value(&json!({"order_id": 1234, "status": "queued"}));
        assert_eq!(order.id, "1234");
        assert_eq!(order.status.as_deref(), Some("queued"));
    }

    #[test]
    fn test_order_from_value_camel_case_keys() {
        let order = Order::from_value(&json!({
            "id": 1,
            "createdAt": "2026-01-01",
            "trackingNumber": "9400",
        }));
        assert_eq!(order.created_at.as_deref(), Some("2026-01-01"));
        assert_eq!(order.tracking_number.as_deref(), Some("9400"));
    }

    #[test]
    fn test_send_order_collects_recipients() {
        let order = SendOrder::new(12345, "hwDavid")
            .recipient(67890_u64)
            .recipients(vec![11_u64, 12_u64]);
        assert_eq!(order.recipients.len(), 3);
    }
}
