//! Thin process boundary: read one forecast request as JSON on stdin and
//! write the response envelope as JSON on stdout.

use sales_forecast::error::ForecastError;
use sales_forecast::{generate_forecasts_json, ResponseEnvelope};
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let envelope = match serde_json::from_str::<serde_json::Value>(&input) {
        Ok(value) => generate_forecasts_json(&value),
        Err(err) => ResponseEnvelope::failure(&ForecastError::ValidationError(format!(
            "input is not valid JSON: {}",
            err
        ))),
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
