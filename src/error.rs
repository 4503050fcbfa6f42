//! Error types for input validation and data loading
//!
//! The projection engine itself is total; these errors come from the
//! boundary (validation of caller input) and the CSV/JSON loaders.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("monthly growth rate must be finite and greater than zero, got {0}")]
    InvalidGrowthRate(f64),

    #[error("{field} must be finite, got {value}")]
    NonFiniteInput { field: &'static str, value: f64 },

    #[error("average daily sales cannot be negative, got {0}")]
    NegativeSales(f64),

    #[error("lead time must be between 0 and {max} days, got {0}", max = crate::product::MAX_LEAD_TIME_DAYS)]
    InvalidLeadTime(i64),

    #[error("incoming stock on {date} must be a positive quantity, got {quantity}")]
    NonPositiveDelivery { date: chrono::NaiveDate, quantity: f64 },

    #[error("projection horizon must be at least one day")]
    ZeroHorizon,

    #[error("projection horizon of {0} days exceeds the maximum of {max}", max = crate::product::MAX_PROJECTION_DAYS)]
    HorizonTooLong(u32),

    #[error("a {days}-day projection from {today} runs past the last calendar date")]
    HorizonPastCalendar { today: chrono::NaiveDate, days: u32 },

    #[error("invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type ForecastResult<T> = Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = ForecastError::InvalidGrowthRate(-0.5);
        assert!(err.to_string().contains("-0.5"));

        let err = ForecastError::NonFiniteInput { field: "current_inventory", value: f64::NAN };
        assert!(err.to_string().starts_with("current_inventory"));
    }

    #[test]
    fn test_date_error_keeps_source() {
        let source = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d").unwrap_err();
        let err = ForecastError::InvalidDate { value: "2024-13-40".into(), source };
        assert!(std::error::Error::source(&err).is_some());
    }
}
