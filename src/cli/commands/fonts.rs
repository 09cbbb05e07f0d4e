//! The `handwrytten fonts` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum FontsCommand {
    /// List available handwriting fonts.
    List {
        /// List card-customizer (typeset) fonts instead.
        #[arg(long)]
        customizer: bool,
    },
}

pub async fn run(ctx: &CliContext, command: FontsCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        FontsCommand::List { customizer } => {
            if customizer {
                let fonts = client.fonts().list_for_customizer().await?;
                output::print_json(&fonts);
                return Ok(());
            }

            let fonts = client.fonts().list().await?;
            if ctx.json {
                output::print_json(&fonts);
            } else {
                let rows: Vec<Vec<String>> = fonts
                    .iter()
                    .map(|font| vec![font.id.clone(), font.label.clone(), font.name.clone()])
                    .collect();
                output::print_table(&["Id", "Label", "Name"], &rows);
            }
        }
    }
    Ok(())
}
