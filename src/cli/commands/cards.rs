//! The `handwrytten cards` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum CardsCommand {
    /// List available card templates.
    List,
    /// Show details for a specific card.
    Get {
        /// Card id.
        card_id: String,
    },
    /// List card categories.
    Categories,
}

pub async fn run(ctx: &CliContext, command: CardsCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        CardsCommand::List => {
            let cards = client.cards().list().await?;
            if ctx.json {
                output::print_json(&cards);
            } else {
                let rows: Vec<Vec<String>> = cards
                    .iter()
                    .map(|card| {
                        vec![
                            card.id.clone(),
                            card.title.clone(),
                            card.category.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                output::print_table(&["Id", "Title", "Category"], &rows);
            }
        }
        CardsCommand::Get { card_id } => {
            let card = client.cards().get(&card_id).await?;
            if ctx.json {
                output::print_json(&card);
            } else {
                output::detail("Id:      ", &card.id);
                output::detail("Title:   ", &card.title);
                output::detail("Category:", card.category.as_deref().unwrap_or("—"));
                output::detail("Image:   ", card.image_url.as_deref().unwrap_or("—"));
            }
        }
        CardsCommand::Categories => {
            let categories = client.cards().categories().await?;
            output::print_json(&categories);
        }
    }
    Ok(())
}
