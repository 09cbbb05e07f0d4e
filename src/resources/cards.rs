//! Browse card and stationery templates.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::{extract_items, parse_items};

/// A card/stationery template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Card {
    /// Card id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Preview image URL.
    pub image_url: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Cover image URL.
    pub cover: Option<String>,
}

impl FromValue for Card {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id"]),
            title: de::string_at(value, &["title", "name"]),
            image_url: de::opt_string_at(value, &["image_url", "image", "cover"]),
            category: de::opt_string_at(value, &["category", "product_type"]),
            cover: de::opt_string_at(value, &["cover"]),
        }
    }
}

/// Card catalog endpoints, obtained from
/// [`Handwrytten::cards`](crate::Handwrytten::cards).
///
/// # Example
///
/// ```rust,ignore
/// let cards = client.cards().list().await?;
/// for card in &cards {
///     println!("{} {}", card.id, card.title);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cards<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Cards<'_> {
    /// Gets all available card templates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Vec<Card>, ApiError> {
        let data = self.http.get("cards/list", None).await?;
        Ok(parse_items(data, &["results", "cards"]))
    }

    /// Gets a single card by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn get(&self, card_id: &str) -> Result<Card, ApiError> {
        let data = self.http.get(&format!("cards/get/{card_id}"), None).await?;
        Ok(Card::from_value(&data))
    }

    /// Gets available card categories as raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn categories(&self) -> Result<Vec<Value>, ApiError> {
        let data = self.http.get("cards/categories", None).await?;
        Ok(extract_items(data, &["categories", "results"]))
    }
}
