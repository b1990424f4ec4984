//! # Sales Forecast
//!
//! A Rust library for short-horizon monthly demand forecasting of retail items.
//!
//! ## Features
//!
//! - Historical series normalization (sorting, price derivation and fill)
//! - Seasonality estimation (learned from history or manually supplied)
//! - Seven closed-form forecasting methods over a deseasoned series
//! - A single success/failure response envelope suitable for JSON transport
//!
//! ## Forecasting Methods
//!
//! | Name | Model |
//! |------|-------|
//! | `seasonal_naive` | last deseasoned observation repeated, reseasoned |
//! | `moving_avg_12` | trailing 12-month average, reseasoned |
//! | `trend_seasonal` | least-squares linear trend, reseasoned |
//! | `robust_low` | conservative 70/30 blend of the two above |
//! | `availability_plan` | compound annual growth from a recent anchor |
//! | `rwlt_monthly_plan` | recency-weighted linear trend on daily rate (default) |
//! | `rwlt_plan` | alias of `rwlt_monthly_plan` |
//!
//! ## Quick Start
//!
//! ```
//! use sales_forecast::generate_forecasts_json;
//! use serde_json::json;
//!
//! let request = json!({
//!     "historical_data": [
//!         { "period": "2024-01", "units_sold": 120.0, "sales_amount": 1200.0 },
//!         { "period": "2024-02", "units_sold": 95.0, "sales_amount": 950.0 },
//!         { "period": "2024-03", "units_sold": 110.0, "sales_amount": 1100.0 }
//!     ],
//!     "forecast_config": {
//!         "methods": ["seasonal_naive", "moving_avg_12"],
//!         "horizon_months": 3
//!     }
//! });
//!
//! let envelope = generate_forecasts_json(&request);
//! assert!(envelope.is_success());
//! ```
//!
//! The whole computation is a pure function of its input: no global state,
//! no I/O inside the core, so independent requests may run in parallel
//! without any synchronization.

pub mod calendar;
pub mod data;
pub mod engine;
pub mod error;
pub mod methods;
pub mod seasonality;

// Re-export commonly used types
pub use crate::data::{HistoricalPoint, HistoricalRecord, HistoricalSeries};
pub use crate::engine::{
    generate_forecasts, generate_forecasts_json, ForecastConfig, ForecastRequest, ResponseEnvelope,
};
pub use crate::error::{ForecastError, Result};
pub use crate::methods::{ForecastPoint, ForecastResult, Method};
pub use crate::seasonality::{DeseasonedSeries, SeasonalityMap};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
