//! Least-squares linear trend over the deseasoned history

use crate::calendar;
use crate::error::{ForecastError, Result};
use crate::methods::ForecastPoint;
use crate::seasonality::DeseasonedSeries;
use chrono::{Datelike, NaiveDate};

/// Fit an ordinary least-squares line to deseasoned units against a 0-based
/// month index over the full history, project it over the horizon, and
/// reseason per forecast month. Negative trend projections are clamped to 0.
pub fn trend_seasonal(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let points = series.points();
    if points.is_empty() {
        return Err(ForecastError::ComputationError(
            "trend_seasonal on empty series".to_string(),
        ));
    }

    let n = points.len() as f64;
    let x_mean = (points.len() - 1) as f64 / 2.0;
    let y_mean = points.iter().map(|p| p.deseason_units).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, point) in points.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (point.deseason_units - y_mean);
        denominator += dx * dx;
    }

    // Degenerate variance in the month index yields a flat fit at the mean.
    let (slope, intercept) = if denominator > 0.0 {
        let slope = numerator / denominator;
        (slope, y_mean - slope * x_mean)
    } else {
        (0.0, y_mean)
    };

    let last_index = (points.len() - 1) as f64;
    let price = points[points.len() - 1].price;

    let mut forecasts = Vec::with_capacity(horizon);
    for k in 0..horizon {
        let date = calendar::add_months(start, k as u32);
        let trend_value = (intercept + slope * (last_index + k as f64 + 1.0)).max(0.0);
        let units = trend_value * series.seasonality().index_for(date.month());
        forecasts.push(ForecastPoint::new(date, units, units * price));
    }
    Ok(forecasts)
}
