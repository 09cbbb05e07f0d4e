//! The `handwrytten gift-cards` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum GiftCardsCommand {
    /// List available gift card products.
    List,
}

pub async fn run(ctx: &CliContext, command: GiftCardsCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        GiftCardsCommand::List => {
            let gift_cards = client.gift_cards().list().await?;
            if ctx.json {
                output::print_json(&gift_cards);
            } else {
                let rows: Vec<Vec<String>> = gift_cards
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.clone(),
                            g.title.clone(),
                            g.amount.map_or_else(String::new, |a| format!("{a:.2}")),
                        ]
                    })
                    .collect();
                output::print_table(&["Id", "Title", "Amount"], &rows);
            }
        }
    }
    Ok(())
}
