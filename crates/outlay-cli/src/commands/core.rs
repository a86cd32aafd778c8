//! Shared command utilities
//!
//! This module contains:
//! - `load_forecaster` - Build a forecaster from the effective configuration
//! - `resolve_format` - Pick the input format from a flag or file extension
//! - `open_input` - Open a transaction file, or stdin

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::{ForecastConfig, Forecaster, InputFormat};

/// Load configuration (explicit path, data-dir override, or defaults)
pub fn load_forecaster(config_path: Option<&Path>) -> Result<Forecaster> {
    let (config, source) =
        ForecastConfig::load(config_path).context("Failed to load forecast configuration")?;
    tracing::debug!(source = %source, "Loaded forecast configuration");
    Ok(Forecaster::new(config))
}

/// Use the --format flag if given, otherwise infer from the file extension
/// (`.csv` is CSV, anything else JSON)
pub fn resolve_format(format: Option<&str>, file: Option<&Path>) -> Result<InputFormat> {
    if let Some(format) = format {
        return format.parse().map_err(|e: String| anyhow::anyhow!(e));
    }

    let is_csv = file
        .and_then(|f| f.extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    Ok(if is_csv {
        InputFormat::Csv
    } else {
        InputFormat::Json
    })
}

/// Open the transaction source: a file if given, stdin otherwise
pub fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
