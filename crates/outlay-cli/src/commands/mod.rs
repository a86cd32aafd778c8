//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Show the effective forecast configuration
//! - `core` - Shared utilities (load_forecaster, resolve_format, open_input)
//! - `forecast` - JSON forecast response
//! - `reports` - Human-readable forecast report

pub mod config;
pub mod core;
pub mod forecast;
pub mod reports;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use reports::*;
