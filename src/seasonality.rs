//! Seasonality estimation and deseasoned series construction

use crate::data::HistoricalSeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Number of historical months required before seasonality is learned.
const MIN_POINTS_FOR_SEASONALITY: usize = 12;

/// Per-calendar-month multiplicative demand indices.
///
/// Learned maps average 1.0 across the twelve months; manually supplied
/// patterns are taken as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityMap {
    indices: [f64; 12],
}

impl SeasonalityMap {
    /// A flat map (every month 1.0), used when history is too short to
    /// detect seasonality.
    pub fn flat() -> Self {
        Self { indices: [1.0; 12] }
    }

    /// Parse a manual pattern of twelve semicolon-separated values,
    /// interpreted as months 1-12 in order.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(';').collect();
        if parts.len() != 12 {
            return Err(ForecastError::ConfigError(format!(
                "seasonality pattern must have 12 values, got {}",
                parts.len()
            )));
        }

        let mut indices = [1.0; 12];
        for (i, part) in parts.iter().enumerate() {
            indices[i] = part.trim().parse::<f64>().map_err(|_| {
                ForecastError::ConfigError(format!(
                    "seasonality pattern value '{}' is not numeric",
                    part.trim()
                ))
            })?;
        }
        Ok(Self { indices })
    }

    /// Learn indices from history via ratio-to-moving-average.
    ///
    /// With fewer than 12 observations every month maps to 1.0. Otherwise
    /// each point's units are divided by its trailing 12-month moving
    /// average (the window shrinks near the series start), the ratios are
    /// averaged per calendar month, and the averages are normalized so
    /// their mean is 1.0. Months without a usable ratio default to 1.0.
    pub fn learned(series: &HistoricalSeries) -> Self {
        let points = series.points();
        if points.len() < MIN_POINTS_FOR_SEASONALITY {
            return Self::flat();
        }

        let units: Vec<f64> = points.iter().map(|p| p.units_sold).collect();
        let mut ratio_sums = [0.0_f64; 12];
        let mut ratio_counts = [0_usize; 12];

        for (i, point) in points.iter().enumerate() {
            let window = &units[i.saturating_sub(11)..=i];
            let moving_avg = window.iter().sum::<f64>() / window.len() as f64;
            // Ratios are undefined where the moving average is zero.
            if moving_avg > 0.0 {
                let month = point.date.month0() as usize;
                ratio_sums[month] += point.units_sold / moving_avg;
                ratio_counts[month] += 1;
            }
        }

        let observed: Vec<f64> = (0..12)
            .filter(|&m| ratio_counts[m] > 0)
            .map(|m| ratio_sums[m] / ratio_counts[m] as f64)
            .collect();
        if observed.is_empty() {
            return Self::flat();
        }

        let mean = observed.iter().sum::<f64>() / observed.len() as f64;
        if mean <= 0.0 {
            return Self::flat();
        }

        let mut indices = [1.0; 12];
        for month in 0..12 {
            if ratio_counts[month] > 0 {
                indices[month] = (ratio_sums[month] / ratio_counts[month] as f64) / mean;
            }
        }
        Self { indices }
    }

    /// Index for a calendar month (1-12).
    pub fn index_for(&self, month: u32) -> f64 {
        self.indices[(month as usize) - 1]
    }

    /// Month-number-keyed view for the response envelope.
    pub fn to_month_map(&self) -> BTreeMap<u32, f64> {
        (1..=12).map(|m| (m, self.index_for(m))).collect()
    }
}

/// One observation with its seasonal effect divided out.
#[derive(Debug, Clone)]
pub struct DeseasonedPoint {
    /// First day of the observed month
    pub date: NaiveDate,
    /// Raw units sold
    pub units_sold: f64,
    /// Unit price from the normalized series
    pub price: f64,
    /// Seasonal index applied to this month
    pub seasonal_index: f64,
    /// `units_sold / seasonal_index`, or raw units when the index is not positive
    pub deseason_units: f64,
}

/// History joined with its seasonality map.
///
/// Built once per request and shared read-only across every invoked method;
/// `robust_low` relies on the composed methods seeing identical inputs.
#[derive(Debug, Clone)]
pub struct DeseasonedSeries {
    points: Vec<DeseasonedPoint>,
    seasonality: SeasonalityMap,
}

impl DeseasonedSeries {
    /// Join the normalized history with a seasonality map.
    pub fn new(series: &HistoricalSeries, seasonality: SeasonalityMap) -> Self {
        let points = series
            .points()
            .iter()
            .map(|point| {
                let index = seasonality.index_for(point.date.month());
                let deseason_units = if index > 0.0 {
                    point.units_sold / index
                } else {
                    point.units_sold
                };
                DeseasonedPoint {
                    date: point.date,
                    units_sold: point.units_sold,
                    price: point.price,
                    seasonal_index: index,
                    deseason_units,
                }
            })
            .collect();
        Self { points, seasonality }
    }

    /// The deseasoned observations, oldest first.
    pub fn points(&self) -> &[DeseasonedPoint] {
        &self.points
    }

    /// The seasonality map shared by all methods.
    pub fn seasonality(&self) -> &SeasonalityMap {
        &self.seasonality
    }

    /// Number of observed months.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HistoricalRecord, HistoricalSeries};

    fn series_from(units: &[f64]) -> HistoricalSeries {
        let records = units
            .iter()
            .enumerate()
            .map(|(i, &u)| HistoricalRecord {
                period: format!("20{:02}-{:02}", 20 + i / 12, 1 + i % 12),
                units_sold: u,
                sales_amount: Some(u * 10.0),
                price: None,
            })
            .collect();
        HistoricalSeries::normalize(records).unwrap()
    }

    #[test]
    fn test_from_pattern_valid() {
        let map = SeasonalityMap::from_pattern("1.2;0.8;1;1;1;1;1;1;1;1;1;1").unwrap();
        assert!((map.index_for(1) - 1.2).abs() < 1e-9);
        assert!((map.index_for(2) - 0.8).abs() < 1e-9);
        assert!((map.index_for(12) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_pattern_wrong_count() {
        let err = SeasonalityMap::from_pattern("1;1;1").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_from_pattern_non_numeric() {
        let err = SeasonalityMap::from_pattern("1;1;1;1;1;high;1;1;1;1;1;1").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_short_history_is_flat() {
        let series = series_from(&[50.0, 80.0, 120.0]);
        let map = SeasonalityMap::learned(&series);
        for month in 1..=12 {
            assert_eq!(map.index_for(month), 1.0);
        }

        // Deseasoned units equal raw units under a flat map
        let deseasoned = DeseasonedSeries::new(&series, map);
        for point in deseasoned.points() {
            assert_eq!(point.deseason_units, point.units_sold);
        }
    }

    #[test]
    fn test_constant_series_learns_flat_indices() {
        let series = series_from(&[100.0; 24]);
        let map = SeasonalityMap::learned(&series);
        for month in 1..=12 {
            assert!((map.index_for(month) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_learned_indices_positive_and_mean_one() {
        // Two years of a strong summer peak
        let year: Vec<f64> = vec![
            60.0, 70.0, 80.0, 100.0, 130.0, 160.0, 180.0, 170.0, 120.0, 90.0, 70.0, 60.0,
        ];
        let mut units = year.clone();
        units.extend(year);
        let series = series_from(&units);
        let map = SeasonalityMap::learned(&series);

        let mut sum = 0.0;
        for month in 1..=12 {
            assert!(map.index_for(month) > 0.0);
            sum += map.index_for(month);
        }
        assert!((sum / 12.0 - 1.0).abs() < 1e-9);

        // Summer months index above 1, winter below
        assert!(map.index_for(7) > 1.0);
        assert!(map.index_for(1) < 1.0);
    }

    #[test]
    fn test_all_zero_series_defaults_flat() {
        let series = series_from(&[0.0; 14]);
        let map = SeasonalityMap::learned(&series);
        for month in 1..=12 {
            assert_eq!(map.index_for(month), 1.0);
        }
    }

    #[test]
    fn test_deseason_guards_non_positive_index() {
        let series = series_from(&[100.0, 100.0]);
        let map = SeasonalityMap::from_pattern("0;-1;1;1;1;1;1;1;1;1;1;1").unwrap();
        let deseasoned = DeseasonedSeries::new(&series, map);
        // January index 0 and February index -1: raw units pass through
        assert_eq!(deseasoned.points()[0].deseason_units, 100.0);
        assert_eq!(deseasoned.points()[1].deseason_units, 100.0);
    }

    #[test]
    fn test_to_month_map_has_twelve_entries() {
        let map = SeasonalityMap::flat().to_month_map();
        assert_eq!(map.len(), 12);
        assert_eq!(map[&1], 1.0);
        assert_eq!(map[&12], 1.0);
    }
}
