//! Basic forecasting example: two years of seasonal history, three methods.
//!
//! Run with: cargo run --example basic_forecast

use sales_forecast::generate_forecasts_json;
use serde_json::json;

fn main() {
    // Two years of monthly history with a summer peak
    let monthly_units = [
        60.0, 70.0, 80.0, 100.0, 130.0, 160.0, 180.0, 170.0, 120.0, 90.0, 70.0, 60.0,
    ];
    let mut rows = Vec::new();
    for year in [2023, 2024] {
        for (month, units) in monthly_units.iter().enumerate() {
            rows.push(json!({
                "period": format!("{}-{:02}", year, month + 1),
                "units_sold": units,
                "sales_amount": units * 12.5
            }));
        }
    }

    let request = json!({
        "historical_data": rows,
        "forecast_config": {
            "methods": ["rwlt_monthly_plan", "seasonal_naive", "robust_low"],
            "horizon_months": 6
        },
        "item_metadata": { "sku": "DEMO-001", "currency": "EUR" }
    });

    let envelope = generate_forecasts_json(&request);
    match serde_json::to_string_pretty(&envelope) {
        Ok(rendered) => println!("{}", rendered),
        Err(err) => eprintln!("failed to render envelope: {}", err),
    }
}
