//! lnproof CLI entry point.

mod cli;

use clap::Parser;
use cli::Cli;
use lnproof::{PaymentValidator, ValidationSession};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Build configuration
    let config = cli.to_config()?;

    // Initialize tracing; stdout is reserved for the result
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("lnproof v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {config:?}");

    let input = cli.to_input(std::io::stdin().lock())?;
    let session = ValidationSession::new(PaymentValidator::new(&config));
    let submission = session.submit(input.invoice, input.preimage).await;
    let result = submission.result();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.message);
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
