//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::ForecastConfig;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) =
        ForecastConfig::load(config_path).context("Failed to load forecast configuration")?;

    println!("# Source: {}", source);
    println!("{}", config.to_toml()?);
    Ok(())
}
