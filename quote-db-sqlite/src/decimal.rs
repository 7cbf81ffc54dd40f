//! Parse helpers for the TEXT-encoded columns.
//!
//! Monetary values and dates are stored as TEXT so they round-trip exactly;
//! SQLite's REAL would lose the minor-unit precision the calculator
//! guarantees.

use chrono::{DateTime, NaiveDate, Utc};
use quote_core::RepositoryError;
use rust_decimal::Decimal;

pub fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Invalid decimal '{s}': {e}")))
}

/// Timestamps are stored as RFC 3339 strings in UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Database(format!("Invalid timestamp '{s}': {e}")))
}

/// Calendar dates (subscription end) are stored as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Database(format!("Invalid date '{s}': {e}")))
}

pub fn parse_optional_date(s: &Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    s.as_deref().map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(parse_decimal("123.45"), Ok(dec!(123.45)));
    }

    #[test]
    fn parses_decimal_with_surrounding_whitespace() {
        assert_eq!(parse_decimal(" 0.01 "), Ok(dec!(0.01)));
    }

    #[test]
    fn rejects_non_numeric_decimal() {
        assert!(matches!(
            parse_decimal("cheap"),
            Err(RepositoryError::Database(_))
        ));
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let dt = parse_datetime("2026-08-30T12:00:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-08-30T12:00:00+00:00");
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(RepositoryError::Database(_))
        ));
    }

    #[test]
    fn parses_iso_date() {
        let d = parse_date("2026-08-30").unwrap();
        assert_eq!(d.to_string(), "2026-08-30");
    }

    #[test]
    fn rejects_bad_date() {
        assert!(matches!(
            parse_date("30.08.2026"),
            Err(RepositoryError::Database(_))
        ));
    }
}
