//! Historical sales data handling and input normalization

use crate::calendar;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// One raw monthly sales row as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalRecord {
    /// Calendar month, "YYYY-MM"
    pub period: String,
    /// Units sold in the month (non-negative)
    pub units_sold: f64,
    /// Revenue for the month; defaults to 0 when absent
    #[serde(default)]
    pub sales_amount: Option<f64>,
    /// Unit price; derived from sales_amount and units_sold when absent
    #[serde(default)]
    pub price: Option<f64>,
}

/// One normalized observation with a defined price.
#[derive(Debug, Clone)]
pub struct HistoricalPoint {
    /// First day of the observed month
    pub date: NaiveDate,
    /// Units sold in the month
    pub units_sold: f64,
    /// Revenue for the month
    pub sales_amount: f64,
    /// Unit price after derivation and fill
    pub price: f64,
}

impl HistoricalPoint {
    /// The observation's "YYYY-MM" period string.
    pub fn period(&self) -> String {
        calendar::format_period(self.date)
    }
}

/// Ordered monthly sales history.
///
/// Invariants established by [`HistoricalSeries::normalize`]: at least one
/// point, strictly ascending unique periods, every price defined.
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    /// Validate and clean a raw historical series.
    ///
    /// Sorts by period, defaults missing `sales_amount` to 0, derives prices
    /// (`sales_amount / units_sold` where units are non-zero), and fills
    /// undefined prices forward, then backward, then with 0.
    pub fn normalize(records: Vec<HistoricalRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(ForecastError::ValidationError(
                "historical_data is empty".to_string(),
            ));
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let date = calendar::parse_period(&record.period)?;
            if !record.units_sold.is_finite() || record.units_sold < 0.0 {
                return Err(ForecastError::ValidationError(format!(
                    "units_sold must be a non-negative number, got {} for period {}",
                    record.units_sold, record.period
                )));
            }
            rows.push((date, record));
        }

        rows.sort_by_key(|(date, _)| *date);
        for pair in rows.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(ForecastError::ValidationError(format!(
                    "duplicate period {}",
                    calendar::format_period(pair[0].0)
                )));
            }
        }

        // Derive per-row prices; rows where derivation divides by zero units
        // stay undefined for now.
        let mut prices: Vec<Option<f64>> = rows
            .iter()
            .map(|(_, record)| match record.price {
                Some(price) => Some(price),
                None => {
                    let amount = record.sales_amount.unwrap_or(0.0);
                    if record.units_sold != 0.0 {
                        Some(amount / record.units_sold)
                    } else {
                        None
                    }
                }
            })
            .collect();

        // Forward-fill from earlier defined prices, then back-fill from later
        // ones; an all-undefined series falls back to 0.
        let mut seen = None;
        for slot in prices.iter_mut() {
            match slot {
                Some(price) => seen = Some(*price),
                None => *slot = seen,
            }
        }
        let mut seen = None;
        for slot in prices.iter_mut().rev() {
            match slot {
                Some(price) => seen = Some(*price),
                None => *slot = seen,
            }
        }

        let points = rows
            .into_iter()
            .zip(prices)
            .map(|((date, record), price)| HistoricalPoint {
                date,
                units_sold: record.units_sold,
                sales_amount: record.sales_amount.unwrap_or(0.0),
                price: price.unwrap_or(0.0),
            })
            .collect();

        Ok(Self { points })
    }

    /// The normalized observations, oldest first.
    pub fn points(&self) -> &[HistoricalPoint] {
        &self.points
    }

    /// Number of observed months.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false after normalization; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent observation.
    pub fn last(&self) -> &HistoricalPoint {
        &self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: &str, units: f64, amount: Option<f64>, price: Option<f64>) -> HistoricalRecord {
        HistoricalRecord {
            period: period.to_string(),
            units_sold: units,
            sales_amount: amount,
            price,
        }
    }

    #[test]
    fn test_normalize_sorts_by_period() {
        let series = HistoricalSeries::normalize(vec![
            record("2024-03", 30.0, Some(300.0), None),
            record("2024-01", 10.0, Some(100.0), None),
            record("2024-02", 20.0, Some(200.0), None),
        ])
        .unwrap();

        let periods: Vec<String> = series.points().iter().map(|p| p.period()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_normalize_rejects_empty_series() {
        let err = HistoricalSeries::normalize(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_normalize_rejects_duplicate_periods() {
        let err = HistoricalSeries::normalize(vec![
            record("2024-01", 10.0, None, None),
            record("2024-01", 20.0, None, None),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_normalize_rejects_malformed_period() {
        let err =
            HistoricalSeries::normalize(vec![record("January", 10.0, None, None)]).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_normalize_rejects_negative_units() {
        let err =
            HistoricalSeries::normalize(vec![record("2024-01", -5.0, None, None)]).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_price_derived_from_sales_amount() {
        let series =
            HistoricalSeries::normalize(vec![record("2024-01", 10.0, Some(150.0), None)]).unwrap();
        assert!((series.points()[0].price - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_supplied_price_used_verbatim() {
        let series =
            HistoricalSeries::normalize(vec![record("2024-01", 10.0, Some(150.0), Some(99.0))])
                .unwrap();
        assert!((series.points()[0].price - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_forward_filled_over_zero_units() {
        let series = HistoricalSeries::normalize(vec![
            record("2024-01", 10.0, Some(150.0), None),
            record("2024-02", 0.0, Some(0.0), None),
            record("2024-03", 20.0, Some(400.0), None),
        ])
        .unwrap();
        // zero-units month inherits the January price
        assert!((series.points()[1].price - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_back_filled_at_series_start() {
        let series = HistoricalSeries::normalize(vec![
            record("2024-01", 0.0, Some(0.0), None),
            record("2024-02", 20.0, Some(400.0), None),
        ])
        .unwrap();
        assert!((series.points()[0].price - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_undefined_prices_default_to_zero() {
        let series = HistoricalSeries::normalize(vec![
            record("2024-01", 0.0, None, None),
            record("2024-02", 0.0, None, None),
        ])
        .unwrap();
        assert_eq!(series.points()[0].price, 0.0);
        assert_eq!(series.points()[1].price, 0.0);
    }

    #[test]
    fn test_missing_sales_amount_defaults_to_zero() {
        let series = HistoricalSeries::normalize(vec![record("2024-01", 10.0, None, None)]).unwrap();
        assert_eq!(series.points()[0].sales_amount, 0.0);
        assert_eq!(series.points()[0].price, 0.0);
    }
}
