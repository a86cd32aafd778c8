//! Outlay CLI - Monthly expense forecasting
//!
//! Usage:
//!   outlay forecast --file txns.json    Print the forecast as JSON
//!   outlay report --file txns.csv       Print a readable forecast report
//!   outlay config                       Show the effective configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging (stderr, so stdout stays machine-readable)
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Forecast {
            file,
            format,
            pretty,
            insights,
        } => commands::cmd_forecast(
            cli.config.as_deref(),
            file.as_deref(),
            format.as_deref(),
            pretty,
            insights,
        ),
        Commands::Report { file, format } => {
            commands::cmd_report(cli.config.as_deref(), file.as_deref(), format.as_deref())
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
