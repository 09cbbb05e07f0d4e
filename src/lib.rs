//! # Handwrytten Rust SDK
//!
//! A Rust SDK and CLI for the [Handwrytten](https://www.handwrytten.com)
//! API — send real handwritten notes programmatically.
//!
//! ## Overview
//!
//! This SDK provides:
//! - A typed, async client for every API area: cards, fonts, gift cards,
//!   inserts, custom card designs, QR codes, the address book, the basket,
//!   and orders
//! - Automatic retries with exponential backoff for rate-limit and server
//!   errors, honoring `Retry-After`
//! - A closed [`ApiError`] taxonomy derived deterministically from response
//!   status codes
//! - Flexible recipient handling: saved address ids, friendly field
//!   mappings, raw wire mappings, [`Address`] values, and free-text
//!   address parsing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handwrytten::{Address, Handwrytten, SendOrder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Handwrytten::new("your_api_key_here")?;
//!
//! let order = SendOrder::new(12345, "hwDavid")
//!     .message("Thanks for your business!")
//!     .recipient(Address::new("Jane", "Doe", "123 Main St", "Phoenix", "AZ", "85001"));
//!
//! let confirmation = client.orders().send(order).await?;
//! println!("{confirmation}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Recipient forms
//!
//! Anywhere a recipient is accepted, these forms are interchangeable:
//!
//! - a saved address-book id (`u64`)
//! - an [`Address`] value
//! - a friendly mapping (`firstName`, `street1`, ...), optionally carrying
//!   per-recipient `message`/`wishes`/`sender` overrides
//! - a mapping already in wire form (`to_first_name`, ...), passed through
//!   unchanged
//!
//! Call-level message, wishes, and sender act as defaults for recipients
//! that don't override them; an explicit per-recipient value always wins.
//!
//! ## Errors
//!
//! All API failures surface as [`ApiError`]. Rate-limit (429) and server
//! (5xx) responses are retried transparently up to the configured budget;
//! authentication, bad-request, and not-found errors surface on first
//! occurrence. Malformed local input (unparseable addresses, unsupported
//! recipient shapes, a recipient left without a message) is rejected before
//! any request is issued.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed
//!   explicitly
//! - **Fail-fast validation**: configuration newtypes validate on
//!   construction
//! - **Thread-safe**: the client is `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod address;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

mod client;

#[doc(hidden)]
pub mod cli;

// Re-export public types at crate root for convenience
pub use address::{
    normalize_csv_row, parse_address, Address, AddressError, OrderDefaults, Recipient, Sender,
};
pub use client::Handwrytten;
pub use clients::ApiError;
pub use config::{ApiKey, BaseUrl, Config, ConfigBuilder};
pub use error::ConfigError;
pub use resources::address_book::{
    Country, NewRecipient, NewSender, RecipientUpdate, SavedAddress, State,
};
pub use resources::auth::User;
pub use resources::basket::{BasketSend, PlaceOrder};
pub use resources::cards::Card;
pub use resources::custom_cards::{
    CustomCard, CustomCardParams, CustomImage, Dimension, ImageKind, ImageSource,
};
pub use resources::fonts::Font;
pub use resources::gift_cards::GiftCard;
pub use resources::inserts::Insert;
pub use resources::orders::{Order, SendOrder};
pub use resources::qr_codes::QrCode;
