//! Seasonal naive repetition of the last observation

use crate::calendar;
use crate::error::{ForecastError, Result};
use crate::methods::ForecastPoint;
use crate::seasonality::DeseasonedSeries;
use chrono::{Datelike, NaiveDate};

/// Repeat the last deseasoned observation across the horizon, reseasoned
/// per forecast month. Revenue uses the last observed price.
pub fn seasonal_naive(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let last = series.points().last().ok_or_else(|| {
        ForecastError::ComputationError("seasonal_naive on empty series".to_string())
    })?;
    let base_units = last.deseason_units;
    let price = last.price;

    let mut forecasts = Vec::with_capacity(horizon);
    for k in 0..horizon {
        let date = calendar::add_months(start, k as u32);
        let units = base_units * series.seasonality().index_for(date.month());
        forecasts.push(ForecastPoint::new(date, units, units * price));
    }
    Ok(forecasts)
}
