//! Create, list, and manage QR codes.
//!
//! QR codes can be attached to custom cards via
//! [`CustomCardParams::qr_code_id`](crate::resources::custom_cards::CustomCardParams).

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::{extract_items, parse_items};

/// A QR code attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QrCode {
    /// QR code id.
    pub id: String,
    /// The URL the code points to.
    pub url: Option<String>,
    /// Display name.
    pub title: Option<String>,
}

impl FromValue for QrCode {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id"]),
            url: de::opt_string_at(value, &["url"]),
            title: de::opt_string_at(value, &["title", "name"]),
        }
    }
}

/// QR code endpoints, obtained from
/// [`Handwrytten::qr_codes`](crate::Handwrytten::qr_codes).
///
/// # Example
///
/// ```rust,ignore
/// let qr = client.qr_codes().create("My QR", "https://example.com", None, None).await?;
/// let card = client.custom_cards().create(
///     CustomCardParams::new("Card with QR", dims[0].id.to_string())
///         .qr_code_id(qr.id.parse()?),
/// ).await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QrCodes<'a> {
    pub(crate) http: &'a HttpClient,
}

impl QrCodes<'_> {
    /// Gets all QR codes associated with the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list(&self) -> Result<Vec<QrCode>, ApiError> {
        let data = self.http.get("qrCodes/list", None).await?;
        Ok(parse_items(data, &["list", "results"]))
    }

    /// Creates a new QR code.
    ///
    /// `icon_id` overlays an icon on the code; `webhook_url` receives scan
    /// notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn create(
        &self,
        name: &str,
        url: &str,
        icon_id: Option<u64>,
        webhook_url: Option<&str>,
    ) -> Result<QrCode, ApiError> {
        let mut body = json!({"name": name, "url": url});
        if let Some(icon_id) = icon_id {
            body["icon_id"] = json!(icon_id);
        }
        if let Some(webhook_url) = webhook_url {
            body["webhook_url"] = json!(webhook_url);
        }

        let data = self.http.post("qrCode/", body, None).await?;

        // The create response may carry only the new id.
        let mut code = QrCode::from_value(&data);
        if code.url.is_none() {
            code.url = Some(url.to_string());
        }
        if code.title.is_none() {
            code.title = Some(name.to_string());
        }
        Ok(code)
    }

    /// Deletes a QR code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn delete(&self, qr_code_id: u64) -> Result<Value, ApiError> {
        self.http.delete(&format!("qrCode/{qr_code_id}/")).await
    }

    /// Gets available QR code frames — decorative borders placed around a
    /// code on the card.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn frames(&self) -> Result<Vec<Value>, ApiError> {
        let data = self.http.get("qrCode/frames/", None).await?;
        Ok(extract_items(data, &["frames"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_code_from_value() {
        let code = QrCode::from_value(&json!({"id": 9, "url": "https://x", "name": "Site"}));
        assert_eq!(code.id, "9");
        assert_eq!(code.url.as_deref(), Some("https://x"));
        assert_eq!(code.title.as_deref(), Some("Site"));
    }
}
