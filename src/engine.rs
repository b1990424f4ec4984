//! Request orchestration: resolve configuration, fan out over the requested
//! methods, and package exactly one response envelope.

use crate::calendar;
use crate::data::{HistoricalRecord, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::methods::{growth, ForecastResult, Method};
use crate::seasonality::{DeseasonedSeries, SeasonalityMap};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Forecast horizon when the request does not supply one.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;
/// Method run when the request names none.
pub const DEFAULT_METHOD: &str = "rwlt_monthly_plan";

/// Optional forecast configuration supplied with a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastConfig {
    /// Method names to run, in request order; unknown names are skipped
    #[serde(default)]
    pub methods: Option<Vec<String>>,
    /// Months to forecast (default 12, must be at least 1)
    #[serde(default)]
    pub horizon_months: Option<u32>,
    /// First forecast month "YYYY-MM" (default: month after last observation)
    #[serde(default)]
    pub start_period: Option<String>,
    /// Manual seasonality override: twelve semicolon-separated values
    #[serde(default)]
    pub seasonality_pattern: Option<String>,
    /// Annual growth for `availability_plan` (default 0.30)
    #[serde(default)]
    pub availability_growth_annual: Option<f64>,
}

/// One forecast request: history, configuration, and opaque metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    pub historical_data: Vec<HistoricalRecord>,
    #[serde(default)]
    pub forecast_config: ForecastConfig,
    /// Echoed verbatim in the success envelope
    #[serde(default)]
    pub item_metadata: Map<String, Value>,
}

/// Success or failure wrapper; exactly one shape is ever returned.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success {
        success: bool,
        forecasts: Vec<ForecastResult>,
        metadata: Map<String, Value>,
        seasonality_indices: BTreeMap<u32, f64>,
    },
    Failure {
        success: bool,
        error: String,
        error_type: String,
    },
}

impl ResponseEnvelope {
    /// Wrap an error into the failure shape.
    pub fn failure(err: &ForecastError) -> Self {
        Self::Failure {
            success: false,
            error: err.to_string(),
            error_type: err.kind().to_string(),
        }
    }

    /// Whether this is the success shape.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Pure entry point: one request in, one envelope out.
///
/// Every failure in normalization, seasonality estimation, or any method is
/// captured into the failure envelope; nothing propagates past this point
/// and no partial results are returned.
pub fn generate_forecasts(request: ForecastRequest) -> ResponseEnvelope {
    match run(request) {
        Ok(envelope) => envelope,
        Err(err) => ResponseEnvelope::failure(&err),
    }
}

/// JSON boundary: deserialize a raw request value and run it.
///
/// Missing or mistyped fields surface as validation failures in the
/// envelope, never as panics.
pub fn generate_forecasts_json(input: &Value) -> ResponseEnvelope {
    match serde_json::from_value::<ForecastRequest>(input.clone()) {
        Ok(request) => generate_forecasts(request),
        Err(err) => {
            ResponseEnvelope::failure(&ForecastError::ValidationError(err.to_string()))
        }
    }
}

fn run(request: ForecastRequest) -> Result<ResponseEnvelope> {
    let config = request.forecast_config;
    let series = HistoricalSeries::normalize(request.historical_data)?;

    let seasonality = match config.seasonality_pattern.as_deref() {
        Some(pattern) => SeasonalityMap::from_pattern(pattern)?,
        None => SeasonalityMap::learned(&series),
    };
    let deseasoned = DeseasonedSeries::new(&series, seasonality);

    let horizon = config.horizon_months.unwrap_or(DEFAULT_HORIZON_MONTHS);
    if horizon == 0 {
        return Err(ForecastError::ConfigError(
            "horizon_months must be at least 1".to_string(),
        ));
    }

    let start = match config.start_period.as_deref() {
        Some(period) => calendar::parse_period(period).map_err(|_| {
            ForecastError::ConfigError(format!(
                "start_period '{}' is not a valid YYYY-MM period",
                period
            ))
        })?,
        None => calendar::add_months(series.last().date, 1),
    };

    let annual_growth = config
        .availability_growth_annual
        .unwrap_or(growth::DEFAULT_ANNUAL_GROWTH);

    let mut requested = config.methods.unwrap_or_default();
    if requested.is_empty() {
        requested.push(DEFAULT_METHOD.to_string());
    }

    let mut forecasts = Vec::with_capacity(requested.len());
    for name in requested {
        // Unknown method names are skipped, not rejected
        let Some(method) = Method::from_name(&name) else {
            continue;
        };
        let forecast_periods = method.run(&deseasoned, horizon as usize, start, annual_growth)?;
        forecasts.push(ForecastResult {
            method: name,
            forecast_periods,
        });
    }

    Ok(ResponseEnvelope::Success {
        success: true,
        forecasts,
        metadata: request.item_metadata,
        seasonality_indices: deseasoned.seasonality().to_month_map(),
    })
}
