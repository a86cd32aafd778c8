//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Forecast next month's spending from your transaction history
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Monthly expense forecasting from transaction history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Forecast configuration file (TOML)
    ///
    /// Defaults to ~/.local/share/outlay/config/forecast.toml when present,
    /// otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast spending and print the JSON response
    ///
    /// Failures (empty input, too little history, malformed records) are
    /// reported in the response as {"success": false, "error": ...}.
    Forecast {
        /// Transaction file to read (reads stdin if not specified)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Input format: json, csv (inferred from the file extension if not specified)
        #[arg(long)]
        format: Option<String>,

        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,

        /// Include plain-language insights in the response
        #[arg(long)]
        insights: bool,
    },

    /// Show a human-readable forecast report
    Report {
        /// Transaction file to read (reads stdin if not specified)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Input format: json, csv (inferred from the file extension if not specified)
        #[arg(long)]
        format: Option<String>,
    },

    /// Show the effective forecast configuration
    Config,
}
