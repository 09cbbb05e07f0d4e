//! The `handwrytten inserts` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum InsertsCommand {
    /// List available inserts.
    List,
}

pub async fn run(ctx: &CliContext, command: InsertsCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        InsertsCommand::List => {
            let inserts = client.inserts().list().await?;
            if ctx.json {
                output::print_json(&inserts);
            } else {
                let rows: Vec<Vec<String>> = inserts
                    .iter()
                    .map(|insert| vec![insert.id.clone(), insert.title.clone()])
                    .collect();
                output::print_table(&["Id", "Title"], &rows);
            }
        }
    }
    Ok(())
}
