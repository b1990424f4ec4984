//! Forecasting method library and dispatch
//!
//! Every method is a stateless pure function over the shared
//! [`DeseasonedSeries`](crate::seasonality::DeseasonedSeries): same inputs,
//! same output. Dispatch is by tagged variant rather than trait objects
//! since no method carries state of its own.

pub mod growth;
pub mod moving_average;
pub mod naive;
pub mod recency;
pub mod trend;

use crate::calendar;
use crate::error::Result;
use crate::seasonality::DeseasonedSeries;
use chrono::NaiveDate;
use serde::Serialize;

/// One forecasted month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Calendar month, "YYYY-MM"
    pub forecast_period: String,
    /// Forecasted units, rounded to 2 decimals
    pub units_sold: f64,
    /// Forecasted revenue, rounded to 2 decimals
    pub sales_amount: f64,
}

impl ForecastPoint {
    /// Build a point for a forecast month, rounding units and amount to
    /// 2 decimals independently.
    pub fn new(date: NaiveDate, units: f64, amount: f64) -> Self {
        Self {
            forecast_period: calendar::format_period(date),
            units_sold: round2(units),
            sales_amount: round2(amount),
        }
    }
}

/// Forecast series produced by one method.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Requested method name (aliases echo the requested spelling)
    pub method: String,
    /// Exactly horizon-many consecutive months from the anchor
    pub forecast_periods: Vec<ForecastPoint>,
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The known forecasting methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Last deseasoned observation repeated
    SeasonalNaive,
    /// Trailing 12-month average
    MovingAvg12,
    /// Least-squares linear trend over full history
    TrendSeasonal,
    /// 70/30 blend of MovingAvg12 and SeasonalNaive
    RobustLow,
    /// Compound annual growth from a recent anchor
    AvailabilityPlan,
    /// Recency-weighted linear trend on daily rate (the default)
    RwltMonthlyPlan,
}

impl Method {
    /// Resolve a requested method name.
    ///
    /// `rwlt_plan` is a pure alias of `rwlt_monthly_plan`; unknown names
    /// resolve to `None` and are skipped by the orchestrator.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "seasonal_naive" => Some(Self::SeasonalNaive),
            "moving_avg_12" => Some(Self::MovingAvg12),
            "trend_seasonal" => Some(Self::TrendSeasonal),
            "robust_low" => Some(Self::RobustLow),
            "availability_plan" => Some(Self::AvailabilityPlan),
            "rwlt_monthly_plan" | "rwlt_plan" => Some(Self::RwltMonthlyPlan),
            _ => None,
        }
    }

    /// Run the method for `horizon` consecutive months starting at `start`.
    ///
    /// `annual_growth` only affects [`Method::AvailabilityPlan`].
    pub fn run(
        &self,
        series: &DeseasonedSeries,
        horizon: usize,
        start: NaiveDate,
        annual_growth: f64,
    ) -> Result<Vec<ForecastPoint>> {
        match self {
            Self::SeasonalNaive => naive::seasonal_naive(series, horizon, start),
            Self::MovingAvg12 => moving_average::moving_avg_12(series, horizon, start),
            Self::TrendSeasonal => trend::trend_seasonal(series, horizon, start),
            Self::RobustLow => moving_average::robust_low(series, horizon, start),
            Self::AvailabilityPlan => {
                growth::availability_plan(series, horizon, start, annual_growth)
            }
            Self::RwltMonthlyPlan => recency::rwlt_monthly(series, horizon, start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("seasonal_naive", Some(Method::SeasonalNaive))]
    #[case("moving_avg_12", Some(Method::MovingAvg12))]
    #[case("trend_seasonal", Some(Method::TrendSeasonal))]
    #[case("robust_low", Some(Method::RobustLow))]
    #[case("availability_plan", Some(Method::AvailabilityPlan))]
    #[case("rwlt_monthly_plan", Some(Method::RwltMonthlyPlan))]
    #[case("rwlt_plan", Some(Method::RwltMonthlyPlan))]
    #[case("prophet", None)]
    #[case("", None)]
    #[case("SEASONAL_NAIVE", None)]
    fn test_from_name(#[case] name: &str, #[case] expected: Option<Method>) {
        assert_eq!(Method::from_name(name), expected);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.718), 2.72);
        assert_eq!(round2(100.0), 100.0);
    }
}
