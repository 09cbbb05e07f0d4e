//! Browse handwriting styles (fonts).

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::{extract_items, parse_items};

/// A handwriting font/style.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    /// Font id.
    pub id: String,
    /// Font name.
    pub name: String,
    /// Font label, used when placing orders (e.g. `"hwDavid"`).
    pub label: String,
    /// Preview image URL.
    pub preview_url: Option<String>,
}

impl FromValue for Font {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id"]),
            name: de::string_at(value, &["name", "title"]),
            label: de::string_at(value, &["label", "name"]),
            preview_url: de::opt_string_at(value, &["preview_url", "image", "preview"]),
        }
    }
}

/// Font catalog endpoints, obtained from
/// [`Handwrytten::fonts`](crate::Handwrytten::fonts).
#[derive(Debug, Clone, Copy)]
pub struct Fonts<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Fonts<'_> {
    /// Gets all available handwriting fonts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Vec<Font>, ApiError> {
        let data = self.http.get("fonts/list", None).await?;
        Ok(parse_items(data, &["results", "fonts"]))
    }

    /// Gets fonts available for the card customizer.
    ///
    /// These are printed/typeset fonts used in custom card design (header,
    /// footer, main, back text) — different from the handwriting fonts
    /// returned by [`Fonts::list`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list_for_customizer(&self) -> Result<Vec<Value>, ApiError> {
        let data = self.http.get("fonts/listForCustomizer", None).await?;
        Ok(extract_items(data, &["fonts"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_font_label_falls_back_to_name() {
        let font = Font::from_value(&json!({"id": 1, "name": "hwDavid"}));
        assert_eq!(font.name, "hwDavid");
        assert_eq!(font.label, "hwDavid");
    }

    #[test]
    fn test_font_explicit_label_wins() {
        let font = Font::from_value(&json!({"id": 1, "name": "David", "label": "hwDavid"}));
        assert_eq!(font.label, "hwDavid");
    }
}
