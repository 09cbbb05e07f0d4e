//! The `handwrytten orders` command group.

use clap::Subcommand;

use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List recent orders.
    List {
        /// Page number (1-indexed).
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page.
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Show details for a specific order.
    Get {
        /// Order id.
        order_id: String,
    },
}

pub async fn run(ctx: &CliContext, command: OrdersCommand) -> CmdResult {
    let client = ctx.client()?;
    match command {
        OrdersCommand::List { page, per_page } => {
            let orders = client.orders().list(page, per_page).await?;
            if ctx.json {
                output::print_json(&orders);
            } else {
                let rows: Vec<Vec<String>> = orders
                    .iter()
                    .map(|order| {
                        vec![
                            order.id.clone(),
                            order.status.clone().unwrap_or_default(),
                            order.created_at.clone().unwrap_or_default(),
                            order.tracking_number.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                output::print_table(&["Order Id", "Status", "Created", "Tracking"], &rows);
            }
        }
        OrdersCommand::Get { order_id } => {
            let order = client.orders().get(&order_id).await?;
            if ctx.json {
                output::print_json(&order);
            } else {
                output::detail("Order Id:", &order.id);
                output::detail("Status:  ", order.status.as_deref().unwrap_or("—"));
                output::detail("Created: ", order.created_at.as_deref().unwrap_or("—"));
                output::detail("Tracking:", order.tracking_number.as_deref().unwrap_or("—"));
                if let Some(message) = &order.message {
                    let preview: String = message.chars().take(100).collect();
                    output::detail("Message: ", &preview);
                }
            }
        }
    }
    Ok(())
}
