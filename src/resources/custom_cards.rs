//! Upload images and create custom card designs.
//!
//! Typical workflow:
//!
//! 1. Upload a cover and/or logo image with [`CustomCards::upload_image`].
//! 2. (Optional) Verify image quality with [`CustomCards::check_image`].
//! 3. Create the custom card with [`CustomCards::create`], referencing the
//!    uploaded image ids.
//!
//! # Example
//!
//! ```rust,ignore
//! let dims = client.custom_cards().dimensions(Some("flat"), None).await?;
//!
//! let cover = client
//!     .custom_cards()
//!     .upload_image(
//!         ImageSource::Url("https://example.com/cover.jpg".to_string()),
//!         ImageKind::Cover,
//!     )
//!     .await?;
//!
//! let card = client
//!     .custom_cards()
//!     .create(
//!         CustomCardParams::new("My Custom Card", dims[0].id.to_string())
//!             .cover_id(cover.id),
//!     )
//!     .await?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::{ApiError, FilePart, HttpClient};
use crate::resources::de::{self, FromValue};
use crate::resources::parse_items;

/// A card dimension for custom card creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dimension {
    /// Dimension id, referenced by [`CustomCardParams::new`].
    pub id: u64,
    /// `"landscape"` or `"portrait"`.
    pub orientation: String,
    /// `"flat"` or `"folded"`.
    pub format: String,
    /// Open width, as reported by the API.
    pub open_width: String,
    /// Open height, as reported by the API.
    pub open_height: String,
    /// Display name.
    pub name: Option<String>,
}

impl FromValue for Dimension {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::u64_at(value, &["id"]),
            orientation: de::string_at(value, &["orientation"]),
            format: de::string_at(value, &["format"]),
            open_width: de::string_at(value, &["open_width"]),
            open_height: de::string_at(value, &["open_height"]),
            name: de::opt_string_at(value, &["name"]),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} ({})",
            self.open_width, self.open_height, self.format, self.orientation
        )
    }
}

/// An uploaded image for custom card designs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomImage {
    /// Image id, referenced when creating custom cards.
    pub id: u64,
    /// URL of the stored image.
    pub image_url: Option<String>,
    /// `"logo"` or `"cover"`.
    pub image_type: Option<String>,
}

impl FromValue for CustomImage {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::u64_at(value, &["id"]),
            image_url: de::opt_string_at(value, &["src", "image_url", "url"]),
            image_type: de::opt_string_at(value, &["type"]),
        }
    }
}

/// A custom card created from uploaded images.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomCard {
    /// The new card's id, usable with orders.
    pub card_id: u64,
    /// Category the card was filed under.
    pub category_id: Option<u64>,
}

impl FromValue for CustomCard {
    fn from_value(value: &Value) -> Self {
        Self {
            card_id: de::u64_at(value, &["card_id", "id"]),
            category_id: de::opt_u64_at(value, &["category_id"]),
        }
    }
}

/// What an uploaded image is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Writing-side logo.
    Logo,
    /// Full-bleed front/back image.
    Cover,
}

impl ImageKind {
    /// The wire value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Cover => "cover",
        }
    }
}

/// Where an uploaded image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A publicly accessible URL (JPEG/PNG/GIF).
    Url(String),
    /// A local file, uploaded as multipart form data.
    File(PathBuf),
}

/// Parameters for creating a custom card (`cards/createCustomCard`).
///
/// A card has up to four zones — cover (front), header/main/footer
/// (writing side), and back — each taking text or an uploaded logo, plus an
/// optional QR code. Unset fields are omitted from the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomCardParams {
    /// Display name for the custom card.
    pub name: String,
    /// Card dimension id (from [`CustomCards::dimensions`]).
    pub dimension_id: String,
    /// `true` to create a new version of an existing card while preserving
    /// order history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_update: Option<bool>,

    // Cover (front)
    /// Uploaded `"cover"` image id for the front.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<u64>,
    /// Preset front image id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_cover_id: Option<u64>,
    /// Cover image size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_size_percent: Option<u32>,

    // Header (writing side, top)
    /// `"text"` or `"logo"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    /// Header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    /// Font id for header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_font_id: Option<String>,
    /// Font size for header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_font_size: Option<u32>,
    /// Hex colour for header text (e.g. `"#000000"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_font_color: Option<String>,
    /// `"left"`, `"center"`, or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_align: Option<String>,
    /// Uploaded `"logo"` image id for the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_logo_id: Option<u64>,
    /// Header logo size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_logo_size_percent: Option<u32>,

    // Main (writing side, center; folded cards only)
    /// `"text"` or `"logo"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_type: Option<String>,
    /// Main-area text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_text: Option<String>,
    /// Font id for main text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_font_id: Option<String>,
    /// Font size for main text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_font_size: Option<u32>,
    /// Hex colour for main text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_font_color: Option<String>,
    /// `"left"`, `"center"`, or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_align: Option<String>,
    /// Uploaded `"logo"` image id for the main area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_logo_id: Option<u64>,
    /// Main logo size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_logo_size_percent: Option<u32>,

    // Footer (writing side, bottom)
    /// `"text"` or `"logo"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_type: Option<String>,
    /// Footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    /// Font id for footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_font_id: Option<String>,
    /// Font size for footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_font_size: Option<u32>,
    /// Hex colour for footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_font_color: Option<String>,
    /// `"left"`, `"center"`, or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_align: Option<String>,
    /// Uploaded `"logo"` image id for the footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_logo_id: Option<u64>,
    /// Footer logo size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_logo_size_percent: Option<u32>,

    // Back
    /// Uploaded `"cover"` image id for the back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_cover_id: Option<u64>,
    /// Preset back image id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_back_cover_id: Option<u64>,
    /// `"cover"` or `"logo"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_type: Option<String>,
    /// `"left"`, `"center"`, or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_align: Option<String>,
    /// `"center"` or `"bottom"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_vertical_align: Option<String>,
    /// Uploaded `"logo"` image id for the back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_logo_id: Option<u64>,
    /// Back text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_text: Option<String>,
    /// Font id for back text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_font_id: Option<u64>,
    /// Font size for back text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_font_size: Option<u32>,
    /// Hex colour for back text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_font_color: Option<String>,
    /// Back image size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_size_percent: Option<u32>,

    // QR code
    /// QR code id to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_id: Option<u64>,
    /// QR code size percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_size_percent: Option<u32>,
    /// `"left"`, `"center"`, or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_align: Option<String>,
    /// `"main"`, `"header"`, or `"footer"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_location: Option<String>,
    /// QR code frame id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_frame_id: Option<u64>,
}

impl CustomCardParams {
    /// Creates params with the required name and dimension; set the zone
    /// fields directly on the returned value.
    #[must_use]
    pub fn new(name: impl Into<String>, dimension_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension_id: dimension_id.into(),
            ..Self::default()
        }
    }

    /// Sets the front cover image id.
    #[must_use]
    pub const fn cover_id(mut self, cover_id: u64) -> Self {
        self.cover_id = Some(cover_id);
        self
    }

    /// Sets the header logo image id.
    #[must_use]
    pub const fn header_logo_id(mut self, header_logo_id: u64) -> Self {
        self.header_logo_id = Some(header_logo_id);
        self
    }

    /// Attaches a QR code.
    #[must_use]
    pub const fn qr_code_id(mut self, qr_code_id: u64) -> Self {
        self.qr_code_id = Some(qr_code_id);
        self
    }
}

/// Custom card endpoints, obtained from
/// [`Handwrytten::custom_cards`](crate::Handwrytten::custom_cards).
#[derive(Debug, Clone, Copy)]
pub struct CustomCards<'a> {
    pub(crate) http: &'a HttpClient,
}

impl CustomCards<'_> {
    /// Gets customizable card dimensions, optionally filtered by format
    /// (`"flat"`/`"folded"`) and orientation (`"landscape"`/`"portrait"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn dimensions(
        &self,
        format: Option<&str>,
        orientation: Option<&str>,
    ) -> Result<Vec<Dimension>, ApiError> {
        let data = self.http.get("design/dimensions", None).await?;
        let mut dims: Vec<Dimension> = parse_items(data, &["dimensions", "results"]);
        if let Some(format) = format {
            dims.retain(|d| d.format == format);
        }
        if let Some(orientation) = orientation {
            dims.retain(|d| d.orientation == orientation);
        }
        Ok(dims)
    }

    /// Uploads a custom image for use with custom cards.
    ///
    /// A URL source posts JSON; a file source reads the file and posts
    /// multipart form data.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if a file source cannot be read, or
    /// [`ApiError`] on any API failure.
    pub async fn upload_image(
        &self,
        source: ImageSource,
        kind: ImageKind,
    ) -> Result<CustomImage, ApiError> {
        let data = match source {
            ImageSource::Url(url) => {
                self.http
                    .post(
                        "cards/uploadCustomLogo",
                        json!({"url": url, "type": kind.as_str()}),
                        None,
                    )
                    .await?
            }
            ImageSource::File(path) => {
                let bytes = std::fs::read(&path).map_err(|source| ApiError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                let file_name = path
                    .file_name()
                    .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
                let part = FilePart {
                    name: "file".to_string(),
                    file_name,
                    mime_type: guess_mime(&path).to_string(),
                    bytes,
                };
                self.http
                    .post_multipart(
                        "cards/uploadCustomLogo",
                        vec![part],
                        vec![("type".to_string(), kind.as_str().to_string())],
                    )
                    .await?
            }
        };
        Ok(CustomImage::from_value(&data))
    }

    /// Checks whether an uploaded image meets quality requirements,
    /// optionally validating dimensions against a base card.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn check_image(
        &self,
        image_id: u64,
        card_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        let mut body = json!({"image_id": image_id});
        if let Some(card_id) = card_id {
            body["card_id"] = json!(card_id);
        }
        self.http
            .post("cards/checkUploadedCustomLogo", body, None)
            .await
    }

    /// Lists previously uploaded custom images, optionally filtered by
    /// kind.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn list_images(&self, kind: Option<ImageKind>) -> Result<Vec<CustomImage>, ApiError> {
        let query =
            kind.map(|kind| vec![("type".to_string(), kind.as_str().to_string())]);
        let data = self.http.get("cards/listCustomUserImages", query).await?;
        Ok(parse_items(data, &["images"]))
    }

    /// Deletes an uploaded custom image.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn delete_image(&self, image_id: u64) -> Result<Value, ApiError> {
        self.http
            .post("cards/deleteCustomLogo", json!({"image_id": image_id}), None)
            .await
    }

    /// Creates a custom card from uploaded images and text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn create(&self, params: CustomCardParams) -> Result<CustomCard, ApiError> {
        let body = serde_json::to_value(&params).unwrap_or_else(|_| json!({}));
        let data = self.http.post("cards/createCustomCard", body, None).await?;
        Ok(CustomCard::from_value(&data))
    }

    /// Deletes a custom card.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn delete(&self, card_id: u64) -> Result<Value, ApiError> {
        self.http
            .post("design/delete", json!({"id": card_id}), None)
            .await
    }
}

/// MIME type from a file extension, for the image formats the API accepts.
fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_display() {
        let dim = Dimension {
            id: 1,
            orientation: "landscape".to_string(),
            format: "flat".to_string(),
            open_width: "7".to_string(),
            open_height: "5".to_string(),
            name: None,
        };
        assert_eq!(dim.to_string(), "7x5 flat (landscape)");
    }

    #[test]
    fn test_custom_image_url_fallback_chain() {
        let image = CustomImage::from_value(&json!({"id": 3, "src": "https://img/logo.png"}));
        assert_eq!(image.image_url.as_deref(), Some("https://img/logo.png"));
    }

    #[test]
    fn test_custom_card_id_fallback() {
        let card = CustomCard::from_value(&json!({"id": 88}));
        assert_eq!(card.card_id, 88);
    }

    #[test]
    fn test_params_omit_unset_fields() {
        let body = serde_json::to_value(CustomCardParams::new("My Card", "2")).unwrap();
        assert_eq!(body["name"], "My Card");
        assert_eq!(body["dimension_id"], "2");
        assert!(body.get("cover_id").is_none());
        assert!(body.get("header_text").is_none());
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("a.png")), "image/png");
        assert_eq!(guess_mime(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }
}
