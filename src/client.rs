//! The main Handwrytten client — the single entry point for all API
//! interactions.

use std::fmt;

use crate::clients::HttpClient;
use crate::config::{ApiKey, Config};
use crate::error::ConfigError;
use crate::resources::address_book::AddressBook;
use crate::resources::auth::Auth;
use crate::resources::basket::Basket;
use crate::resources::cards::Cards;
use crate::resources::custom_cards::CustomCards;
use crate::resources::fonts::Fonts;
use crate::resources::gift_cards::GiftCards;
use crate::resources::inserts::Inserts;
use crate::resources::orders::Orders;
use crate::resources::qr_codes::QrCodes;

/// Handwrytten API client.
///
/// The primary interface for interacting with the Handwrytten API. Each
/// API area is exposed as a namespaced facade method.
///
/// The client exclusively owns its connection pool; create one instance
/// per API key and reuse it for the lifetime of the program.
///
/// # Thread Safety
///
/// `Handwrytten` is `Send + Sync`; the only shared state is the immutable
/// configuration and the underlying connection pool, which is documented
/// thread-safe.
///
/// # Example
///
/// ```rust,ignore
/// use handwrytten::{Address, Handwrytten, SendOrder};
///
/// let client = Handwrytten::new("your_api_key_here")?;
///
/// // Check your account
/// let user = client.auth().get_user().await?;
/// println!("Logged in as {}", user.email.unwrap_or_default());
///
/// // Browse available cards and fonts
/// let cards = client.cards().list().await?;
/// let fonts = client.fonts().list().await?;
///
/// // Send a handwritten note
/// let order = SendOrder::new(cards[0].id.parse()?, fonts[0].label.as_str())
///     .message("Thanks for being an amazing customer!")
///     .recipient(Address::new("Jane", "Doe", "123 Main Street", "Phoenix", "AZ", "85001"));
/// client.orders().send(order).await?;
/// ```
pub struct Handwrytten {
    http: HttpClient,
}

// Verify Handwrytten is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Handwrytten>();
};

impl Handwrytten {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Config::builder().api_key(ApiKey::new(api_key)?).build()?;
        Ok(Self::with_config(config))
    }

    /// Creates a client from an explicit [`Config`].
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Authentication and user profile endpoints.
    #[must_use]
    pub const fn auth(&self) -> Auth<'_> {
        Auth { http: &self.http }
    }

    /// Card catalog endpoints.
    #[must_use]
    pub const fn cards(&self) -> Cards<'_> {
        Cards { http: &self.http }
    }

    /// Custom card design endpoints.
    #[must_use]
    pub const fn custom_cards(&self) -> CustomCards<'_> {
        CustomCards { http: &self.http }
    }

    /// Handwriting font endpoints.
    #[must_use]
    pub const fn fonts(&self) -> Fonts<'_> {
        Fonts { http: &self.http }
    }

    /// Gift card catalog endpoints.
    #[must_use]
    pub const fn gift_cards(&self) -> GiftCards<'_> {
        GiftCards { http: &self.http }
    }

    /// Insert catalog endpoints.
    #[must_use]
    pub const fn inserts(&self) -> Inserts<'_> {
        Inserts { http: &self.http }
    }

    /// QR code endpoints.
    #[must_use]
    pub const fn qr_codes(&self) -> QrCodes<'_> {
        QrCodes { http: &self.http }
    }

    /// Address book endpoints.
    #[must_use]
    pub const fn address_book(&self) -> AddressBook<'_> {
        AddressBook { http: &self.http }
    }

    /// Basket endpoints.
    #[must_use]
    pub const fn basket(&self) -> Basket<'_> {
        Basket { http: &self.http }
    }

    /// Order endpoints.
    #[must_use]
    pub const fn orders(&self) -> Orders<'_> {
        Orders { http: &self.http }
    }
}

impl fmt::Debug for Handwrytten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show only a key prefix, mirroring the masked ApiKey debug output.
        let key = self.http.config().api_key().as_ref();
        let masked: String = key.chars().take(8).collect();
        write!(f, "Handwrytten(api_key='{masked}...')")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(matches!(
            Handwrytten::new(""),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let client = Handwrytten::new("super-secret-key-value").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("super-se..."));
        assert!(!debug.contains("super-secret-key-value"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Handwrytten>();
    }
}
