//! The `handwrytten account` command group.

use std::io::Write;

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{context, output, CliContext};

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Save your API key for future CLI sessions.
    Login {
        /// Your Handwrytten API key; prompted for when omitted.
        #[arg(long)]
        key: Option<String>,
    },
    /// Show current account info.
    Whoami,
    /// Remove the saved API key.
    Logout,
}

pub async fn run(ctx: &CliContext, command: AccountCommand) -> CmdResult {
    match command {
        AccountCommand::Login { key } => {
            let key = match key {
                Some(key) => key,
                None => prompt("API key: ")?,
            };
            if key.is_empty() {
                return Err("An API key is required.".into());
            }

            // Verify the key works before persisting it.
            let verify_ctx = CliContext {
                api_key: Some(key.clone()),
                ..ctx.clone()
            };
            let client = verify_ctx.client()?;
            let user = client
                .auth()
                .get_user()
                .await
                .map_err(|e| format!("Authentication failed: {e}"))?;

            let path = context::save_api_key(&key)?;

            let name = [user.first_name, user.last_name]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            let who = if name.is_empty() {
                user.email.unwrap_or_else(|| "unknown".to_string())
            } else {
                name
            };
            output::success(&format!("Logged in as {who}"));
            println!("  Key saved to {}", path.display());
        }
        AccountCommand::Whoami => {
            let client = ctx.client()?;
            let user = client.auth().get_user().await?;
            if ctx.json {
                output::print_json(&user);
            } else {
                output::detail("Id:     ", &user.id);
                output::detail("Email:  ", user.email.as_deref().unwrap_or("—"));
                output::detail(
                    "Name:   ",
                    &format!(
                        "{} {}",
                        user.first_name.as_deref().unwrap_or_default(),
                        user.last_name.as_deref().unwrap_or_default()
                    ),
                );
                if let Some(company) = &user.company {
                    output::detail("Company:", company);
                }
                if let Some(credits) = user.credits {
                    output::detail("Credits:", &credits.to_string());
                }
            }
        }
        AccountCommand::Logout => {
            if context::delete_api_key()? {
                output::success("API key removed.");
            } else {
                println!("  No saved credentials found.");
            }
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
