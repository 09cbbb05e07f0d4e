//! The `handwrytten address` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum AddressCommand {
    /// List supported countries.
    Countries,
    /// List states/provinces for a country.
    States {
        /// Country code.
        #[arg(long, default_value = "US")]
        country: String,
    },
}

pub async fn run(ctx: &CliContext, command: AddressCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        AddressCommand::Countries => {
            let countries = client.address_book().countries().await?;
            if ctx.json {
                output::print_json(&countries);
            } else {
                let rows: Vec<Vec<String>> = countries
                    .iter()
                    .map(|c| vec![c.code.clone(), c.name.clone()])
                    .collect();
                output::print_table(&["Code", "Country"], &rows);
            }
        }
        AddressCommand::States { country } => {
            let states = client.address_book().states(&country).await?;
            if ctx.json {
                output::print_json(&states);
            } else {
                let rows: Vec<Vec<String>> = states
                    .iter()
                    .map(|s| vec![s.code.clone(), s.name.clone()])
                    .collect();
                output::print_table(&["Code", "State"], &rows);
            }
        }
    }
    Ok(())
}
