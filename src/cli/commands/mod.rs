//! Command handlers for the CLI.

pub mod account;
pub mod address;
pub mod cards;
pub mod fonts;
pub mod gift_cards;
pub mod inserts;
pub mod orders;
pub mod send;

/// Shared handler result type.
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;
