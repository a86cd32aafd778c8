//! Forecast command: JSON response on stdout

use std::io::Read;
use std::path::Path;

use anyhow::Result;
use outlay_core::{ForecastResponse, Forecaster, InputFormat};

use super::{load_forecaster, open_input, resolve_format};

/// Run the forecast over a reader and serialize the response
pub fn render_forecast<R: Read>(
    forecaster: &Forecaster,
    reader: R,
    format: InputFormat,
    pretty: bool,
    insights: bool,
) -> Result<String> {
    let response = forecaster.forecast_reader(reader, format, insights);
    render_response(&response, pretty)
}

pub fn render_response(response: &ForecastResponse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(json)
}

pub fn cmd_forecast(
    config_path: Option<&Path>,
    file: Option<&Path>,
    format: Option<&str>,
    pretty: bool,
    insights: bool,
) -> Result<()> {
    let forecaster = load_forecaster(config_path)?;
    let format = resolve_format(format, file)?;

    // Unreadable input is reported in-band like any other forecast failure
    let output = match open_input(file) {
        Ok(reader) => render_forecast(&forecaster, reader, format, pretty, insights)?,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open input");
            render_response(&ForecastResponse::failure(format!("{:#}", e)), pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}
