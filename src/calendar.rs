//! Calendar month helpers for "YYYY-MM" period strings

use crate::error::{ForecastError, Result};
use chrono::{Months, NaiveDate};

/// Fixed origin for the day-count axis used by the recency-weighted trend.
pub fn epoch() -> NaiveDate {
    // 2020-01-01 is always a valid date
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Parse a "YYYY-MM" period string into the first day of that month.
pub fn parse_period(period: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").map_err(|_| {
        ForecastError::ValidationError(format!(
            "invalid period '{}': expected YYYY-MM",
            period
        ))
    })
}

/// Format the first-of-month date back to its "YYYY-MM" period string.
pub fn format_period(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Shift a first-of-month date forward by `months` calendar months.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}

/// Number of days in the month starting at `date` (a first-of-month date).
pub fn days_in_month(date: NaiveDate) -> i64 {
    (add_months(date, 1) - date).num_days()
}

/// Whole days elapsed from the fixed epoch to `date`.
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    (date - epoch()).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_valid() {
        let date = parse_period("2024-03").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_period_invalid() {
        assert!(parse_period("2024").is_err());
        assert!(parse_period("2024-13").is_err());
        assert!(parse_period("march").is_err());
    }

    #[test]
    fn test_format_period_round_trip() {
        let date = parse_period("2023-11").unwrap();
        assert_eq!(format_period(date), "2023-11");
    }

    #[test]
    fn test_add_months_rolls_over_year() {
        let date = parse_period("2023-11").unwrap();
        assert_eq!(format_period(add_months(date, 3)), "2024-02");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(parse_period("2024-02").unwrap()), 29); // leap year
        assert_eq!(days_in_month(parse_period("2023-02").unwrap()), 28);
        assert_eq!(days_in_month(parse_period("2023-01").unwrap()), 31);
        assert_eq!(days_in_month(parse_period("2023-04").unwrap()), 30);
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(epoch()), 0.0);
        assert_eq!(days_since_epoch(parse_period("2020-02").unwrap()), 31.0);
    }
}
