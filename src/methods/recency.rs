//! Recency-weighted linear trend on daily sales rate

use crate::calendar;
use crate::error::{ForecastError, Result};
use crate::methods::ForecastPoint;
use crate::seasonality::{DeseasonedPoint, DeseasonedSeries};
use chrono::{Datelike, NaiveDate};

/// Per-day decay applied to observation weights.
const ALPHA: f64 = 0.97;
/// Observations regressed over (fewer when the series is shorter).
const WINDOW_MONTHS: usize = 6;
/// Damping applied to negative fitted slopes.
const NEGATIVE_SLOPE_DAMPING: f64 = 0.5;

/// Forecast by an exponentially age-weighted regression of the daily
/// deseasoned sales rate against days since the fixed epoch, using the last
/// min(6, len) observations. Projected daily rates are scaled back up by
/// the days in each forecast month and reseasoned. Revenue uses the last
/// observed price.
pub fn rwlt_monthly(
    series: &DeseasonedSeries,
    horizon: usize,
    start: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let points = series.points();
    let last = points.last().ok_or_else(|| {
        ForecastError::ComputationError("rwlt_monthly on empty series".to_string())
    })?;

    let window = points.len().min(WINDOW_MONTHS);
    let (slope, intercept) = fit_daily_trend(&points[points.len() - window..], last.date);

    let price = last.price;
    let mut forecasts = Vec::with_capacity(horizon);
    for k in 0..horizon {
        let date = calendar::add_months(start, k as u32);
        let rate = (intercept + slope * calendar::days_since_epoch(date)).max(0.0);
        let units = rate
            * calendar::days_in_month(date) as f64
            * series.seasonality().index_for(date.month());
        forecasts.push(ForecastPoint::new(date, units, units * price));
    }
    Ok(forecasts)
}

/// Weighted least-squares fit of daily rate vs days since epoch.
///
/// Weights decay as `ALPHA^age_days` from the most recent observation.
/// Degenerate variance yields a zero slope; a negative slope is damped
/// before the intercept is anchored, so the damped line still passes
/// through the weighted mean.
fn fit_daily_trend(recent: &[DeseasonedPoint], last_date: NaiveDate) -> (f64, f64) {
    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wy = 0.0;
    let mut sum_wxx = 0.0;
    let mut sum_wxy = 0.0;
    let mut rate_sum = 0.0;

    for point in recent {
        let rate = point.deseason_units / calendar::days_in_month(point.date) as f64;
        let age_days = (last_date - point.date).num_days() as f64;
        let weight = ALPHA.powf(age_days);
        let x = calendar::days_since_epoch(point.date);

        sum_w += weight;
        sum_wx += weight * x;
        sum_wy += weight * rate;
        sum_wxx += weight * x * x;
        sum_wxy += weight * x * rate;
        rate_sum += rate;
    }

    if sum_w > 0.0 {
        let x_bar = sum_wx / sum_w;
        let y_bar = sum_wy / sum_w;
        let var_x = sum_wxx / sum_w - x_bar * x_bar;
        let cov_xy = sum_wxy / sum_w - x_bar * y_bar;

        let mut slope = if var_x > 0.0 { cov_xy / var_x } else { 0.0 };
        if slope < 0.0 {
            slope *= NEGATIVE_SLOPE_DAMPING;
        }
        (slope, y_bar - slope * x_bar)
    } else {
        (0.0, rate_sum / recent.len() as f64)
    }
}
