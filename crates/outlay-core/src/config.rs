//! Forecast configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/outlay/config/forecast.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// Pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Months to forecast
    pub horizon: usize,
    /// Distinct months required before forecasting
    pub min_months: usize,
    /// Trailing months averaged by the moving-average predictor
    pub moving_average_window: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon: 3,
            min_months: 2,
            moving_average_window: 3,
        }
    }
}

/// Trend and volatility classification thresholds (percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    /// Growth beyond +/- this is increasing/decreasing
    pub growth_threshold: f64,
    /// Coefficient of variation below this is low volatility
    pub volatility_low: f64,
    /// Coefficient of variation below this (and above low) is medium
    pub volatility_medium: f64,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            growth_threshold: 5.0,
            volatility_low: 15.0,
            volatility_medium: 30.0,
        }
    }
}

/// Prediction insight thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightSettings {
    /// Percent difference from the average worth calling out
    pub deviation_threshold: f64,
    /// Confidence below this gets a "moderate confidence" note
    pub low_confidence: f64,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            deviation_threshold: 10.0,
            low_confidence: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub forecast: ForecastSettings,
    pub trend: TrendSettings,
    pub insights: InsightSettings,
}

impl ForecastConfig {
    /// Embedded defaults
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Load from an explicit path, the data-dir override, or the embedded
    /// defaults, in that order. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = path {
            return Ok((
                Self::from_file(path)?,
                ConfigSource::File(path.to_path_buf()),
            ));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let config = Self::from_file(&default_path)?;
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        Ok((Self::embedded()?, ConfigSource::Embedded))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        parse_config(&content)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.forecast.horizon == 0 {
            return Err(Error::Config("forecast.horizon must be at least 1".into()));
        }
        if self.forecast.min_months < 2 {
            return Err(Error::Config(
                "forecast.min_months must be at least 2".into(),
            ));
        }
        if self.forecast.moving_average_window == 0 {
            return Err(Error::Config(
                "forecast.moving_average_window must be at least 1".into(),
            ));
        }
        if !(self.trend.growth_threshold >= 0.0) {
            return Err(Error::Config(
                "trend.growth_threshold must be non-negative".into(),
            ));
        }
        if !(self.trend.volatility_medium > self.trend.volatility_low) {
            return Err(Error::Config(
                "trend.volatility_medium must be greater than trend.volatility_low".into(),
            ));
        }
        Ok(())
    }

    /// Render as TOML (for `outlay config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Default override location in the platform data dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("outlay").join("config").join("forecast.toml"))
}

fn parse_config(content: &str) -> Result<ForecastConfig> {
    let config: ForecastConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}
