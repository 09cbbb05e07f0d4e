//! The `handwrytten` command-line interface.
//!
//! ```text
//! $ handwrytten send --card 123 --font hwDavid --message "Thanks!" \
//!       --to "Jane Doe, 123 Main St, Phoenix AZ 85001"
//!
//! $ handwrytten cards list
//! $ handwrytten fonts list
//! $ handwrytten orders get abc123
//! $ handwrytten send --csv recipients.csv --card 123 --font hwDavid -m "Hi {{firstName}}!"
//! ```
//!
//! Global flags (`--api-key`, `--base-url`, `--json`, `--quiet`) are
//! collected once into an immutable [`CliContext`] handed to each command
//! handler.

mod commands;
mod context;
mod output;

pub use context::CliContext;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cli::commands::{account, address, cards, fonts, gift_cards, inserts, orders, send};

/// Send real handwritten notes from the command line.
#[derive(Parser)]
#[command(name = "handwrytten", version, about, propagate_version = true)]
struct Cli {
    /// API key (or set HANDWRYTTEN_API_KEY).
    #[arg(long, env = "HANDWRYTTEN_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, env = "HANDWRYTTEN_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Output raw JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send handwritten notes to one or more recipients.
    Send(send::SendArgs),
    /// Browse card and stationery templates.
    #[command(subcommand)]
    Cards(cards::CardsCommand),
    /// Browse handwriting fonts.
    #[command(subcommand)]
    Fonts(fonts::FontsCommand),
    /// View and manage orders.
    #[command(subcommand)]
    Orders(orders::OrdersCommand),
    /// Browse gift card products.
    #[command(subcommand, name = "gift-cards")]
    GiftCards(gift_cards::GiftCardsCommand),
    /// Browse card inserts.
    #[command(subcommand)]
    Inserts(inserts::InsertsCommand),
    /// Manage your account and credentials.
    #[command(subcommand)]
    Account(account::AccountCommand),
    /// Look up countries and states.
    #[command(subcommand)]
    Address(address::AddressCommand),
}

/// CLI entry point: parses arguments, dispatches the command, and maps any
/// unhandled error to a non-zero exit code.
pub async fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        api_key: cli.api_key.or_else(context::load_api_key),
        base_url: cli.base_url,
        json: cli.json,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Send(args) => send::run(&ctx, args).await,
        Commands::Cards(command) => cards::run(&ctx, command).await,
        Commands::Fonts(command) => fonts::run(&ctx, command).await,
        Commands::Orders(command) => orders::run(&ctx, command).await,
        Commands::GiftCards(command) => gift_cards::run(&ctx, command).await,
        Commands::Inserts(command) => inserts::run(&ctx, command).await,
        Commands::Account(command) => account::run(&ctx, command).await,
        Commands::Address(command) => address::run(&ctx, command).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
