//! Error types for Outlay

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No transaction data provided")]
    NoTransactions,

    #[error("Insufficient data for prediction (minimum {required} months required)")]
    InsufficientData { required: usize },

    #[error("Unable to generate predictions")]
    NoModelAvailable,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    #[error("Non-finite result: {0}")]
    NonFinite(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
