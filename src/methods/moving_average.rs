//! Trailing-average forecasting and the conservative blend built on it

use crate::calendar;
use crate::error::{ForecastError, Result};
use crate::methods::{naive, round2, ForecastPoint};
use crate::seasonality::DeseasonedSeries;
use chrono::{Datelike, NaiveDate};

/// Weight given to the moving-average component of [`robust_low`].
const BLEND_MOVING_AVG: f64 = 0.7;
/// Weight given to the seasonal-naive component of [`robust_low`].
const BLEND_NAIVE: f64 = 0.3;

/// Forecast a constant trailing average, reseasoned per forecast month.
///
/// Uses the mean of the last 12 deseasoned values; a series shorter than 12
/// months falls back to the last min(3, len) values. Revenue uses the last
/// observed price.
pub fn moving_avg_12(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let points = series.points();
    if points.is_empty() {
        return Err(ForecastError::ComputationError(
            "moving_avg_12 on empty series".to_string(),
        ));
    }

    let window = if points.len() >= 12 {
        12
    } else {
        points.len().min(3)
    };
    let tail = &points[points.len() - window..];
    let recent_avg = tail.iter().map(|p| p.deseason_units).sum::<f64>() / window as f64;
    let price = points[points.len() - 1].price;

    let mut forecasts = Vec::with_capacity(horizon);
    for k in 0..horizon {
        let date = calendar::add_months(start, k as u32);
        let units = recent_avg * series.seasonality().index_for(date.month());
        forecasts.push(ForecastPoint::new(date, units, units * price));
    }
    Ok(forecasts)
}

/// Conservative blend: 70% [`moving_avg_12`] + 30% [`seasonal_naive`]
/// per step, applied independently to units and revenue.
///
/// [`seasonal_naive`]: naive::seasonal_naive
pub fn robust_low(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let naive_fc = naive::seasonal_naive(series, horizon, start)?;
    let avg_fc = moving_avg_12(series, horizon, start)?;

    Ok(naive_fc
        .iter()
        .zip(&avg_fc)
        .map(|(naive_point, avg_point)| ForecastPoint {
            forecast_period: naive_point.forecast_period.clone(),
            units_sold: round2(
                BLEND_MOVING_AVG * avg_point.units_sold + BLEND_NAIVE * naive_point.units_sold,
            ),
            sales_amount: round2(
                BLEND_MOVING_AVG * avg_point.sales_amount + BLEND_NAIVE * naive_point.sales_amount,
            ),
        })
        .collect())
}
