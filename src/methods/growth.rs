//! Compound-growth planning from a recent anchor

use crate::calendar;
use crate::error::{ForecastError, Result};
use crate::methods::ForecastPoint;
use crate::seasonality::DeseasonedSeries;
use chrono::{Datelike, NaiveDate};

/// Annual growth assumption when the request does not supply one.
pub const DEFAULT_ANNUAL_GROWTH: f64 = 0.30;
/// Minimum effective annual growth applied to a declining series.
const GROWTH_FLOOR: f64 = 0.05;
/// Months averaged to form the anchor (fewer when the series is shorter).
const ANCHOR_WINDOW: usize = 3;

/// Project compound monthly growth from the recent average, reseasoned per
/// forecast month.
///
/// The anchor is the mean deseasoned units (and mean price) over the last
/// min(3, len) observations. A declining series (last observation below the
/// mean of the last three) has its growth floored at 5% annually.
pub fn availability_plan(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
    annual_growth: f64,
) -> Result<Vec<ForecastPoint>> {
    let points = series.points();
    if points.is_empty() {
        return Err(ForecastError::ComputationError(
            "availability_plan on empty series".to_string(),
        ));
    }

    let window = points.len().min(ANCHOR_WINDOW);
    let tail = &points[points.len() - window..];
    let anchor_units = tail.iter().map(|p| p.deseason_units).sum::<f64>() / window as f64;
    let anchor_price = tail.iter().map(|p| p.price).sum::<f64>() / window as f64;

    let declining = points.len() >= ANCHOR_WINDOW && {
        let last_three = &points[points.len() - ANCHOR_WINDOW..];
        let recent_avg =
            last_three.iter().map(|p| p.deseason_units).sum::<f64>() / ANCHOR_WINDOW as f64;
        points[points.len() - 1].deseason_units < recent_avg
    };

    let effective_growth = if declining {
        annual_growth.max(GROWTH_FLOOR)
    } else {
        annual_growth
    };
    let monthly_growth = (1.0 + effective_growth).powf(1.0 / 12.0) - 1.0;

    let mut forecasts = Vec::with_capacity(horizon);
    for k in 0..horizon {
        let date = calendar::add_months(start, k as u32);
        let planned = (anchor_units * (1.0 + monthly_growth).powi(k as i32 + 1)).max(0.0);
        let units = planned * series.seasonality().index_for(date.month());
        forecasts.push(ForecastPoint::new(date, units, units * anchor_price));
    }
    Ok(forecasts)
}
