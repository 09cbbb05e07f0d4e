//! Browse gift card products.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::parse_items;

/// A gift card product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GiftCard {
    /// Gift card id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Denomination amount.
    pub amount: Option<f64>,
    /// Preview image URL.
    pub image_url: Option<String>,
}

impl FromValue for GiftCard {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id"]),
            title: de::string_at(value, &["title", "name"]),
            amount: de::opt_f64_at(value, &["amount", "value"]),
            image_url: de::opt_string_at(value, &["image_url", "image"]),
        }
    }
}

/// Gift card catalog endpoints, obtained from
/// [`Handwrytten::gift_cards`](crate::Handwrytten::gift_cards).
#[derive(Debug, Clone, Copy)]
pub struct GiftCards<'a> {
    pub(crate) http: &'a HttpClient,
}

impl GiftCards<'_> {
    /// Gets all available gift card products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Vec<GiftCard>, ApiError> {
        let data = self.http.get("giftCards/list", None).await?;
        Ok(parse_items(data, &["results"]))
    }
}
