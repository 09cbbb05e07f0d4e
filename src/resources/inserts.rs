//! Browse card inserts (business cards, flyers, etc.).

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::parse_items;

/// A card insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insert {
    /// Insert id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Preview image URL.
    pub image_url: Option<String>,
}

impl FromValue for Insert {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id"]),
            title: de::string_at(value, &["title", "name"]),
            image_url: de::opt_string_at(value, &["image_url", "image"]),
        }
    }
}

/// Insert catalog endpoints, obtained from
/// [`Handwrytten::inserts`](crate::Handwrytten::inserts).
#[derive(Debug, Clone, Copy)]
pub struct Inserts<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Inserts<'_> {
    /// Gets all available inserts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Vec<Insert>, ApiError> {
        let data = self.http.get("inserts/list", None).await?;
        Ok(parse_items(data, &["results"]))
    }
}
