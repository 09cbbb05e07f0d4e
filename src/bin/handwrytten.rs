//! Binary entry point for the `handwrytten` CLI.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    handwrytten::cli::run().await
}
