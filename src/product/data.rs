//! Product data structures supplied to the projection engine

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// Default projection horizon in days
pub const DEFAULT_PROJECTION_DAYS: u32 = 365;
/// Longest accepted projection horizon (ten years)
pub const MAX_PROJECTION_DAYS: u32 = 3650;
/// Longest accepted supplier lead time (ten years)
pub const MAX_LEAD_TIME_DAYS: i64 = 3650;

fn default_projection_days() -> u32 {
    DEFAULT_PROJECTION_DAYS
}

/// A scheduled delivery of stock on a known calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomingStock {
    pub date: NaiveDate,
    pub quantity: f64,
}

impl IncomingStock {
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Self { date, quantity }
    }
}

/// Snapshot of a product's state for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Units on hand at day 0 (may be fractional)
    pub current_inventory: f64,

    /// Baseline sales velocity at day 0
    pub avg_daily_sales: f64,

    /// Sales multiplier over a nominal 30-day month (1.0 = flat)
    pub monthly_growth_rate: f64,

    /// Days between placing a reorder and receiving it
    pub lead_time_days: i64,

    /// Known future deliveries
    #[serde(default)]
    pub incoming_stock: Vec<IncomingStock>,

    /// Number of simulated days
    #[serde(default = "default_projection_days")]
    pub projection_days: u32,
}

impl ProjectionInput {
    /// Create an input with no scheduled deliveries and the default horizon
    pub fn new(
        current_inventory: f64,
        avg_daily_sales: f64,
        monthly_growth_rate: f64,
        lead_time_days: i64,
    ) -> Self {
        Self {
            current_inventory,
            avg_daily_sales,
            monthly_growth_rate,
            lead_time_days,
            incoming_stock: Vec::new(),
            projection_days: DEFAULT_PROJECTION_DAYS,
        }
    }

    pub fn with_incoming_stock(mut self, incoming_stock: Vec<IncomingStock>) -> Self {
        self.incoming_stock = incoming_stock;
        self
    }

    pub fn with_projection_days(mut self, projection_days: u32) -> Self {
        self.projection_days = projection_days;
        self
    }

    /// Check the caller contract before the engine runs.
    ///
    /// Negative inventory is allowed (the engine reports an immediate
    /// stock-out); a non-positive growth rate is not, since it is raised to
    /// a fractional power.
    pub fn validate(&self) -> ForecastResult<()> {
        if !self.monthly_growth_rate.is_finite() || self.monthly_growth_rate <= 0.0 {
            return Err(ForecastError::InvalidGrowthRate(self.monthly_growth_rate));
        }
        check_finite("current_inventory", self.current_inventory)?;
        check_finite("avg_daily_sales", self.avg_daily_sales)?;
        if self.avg_daily_sales < 0.0 {
            return Err(ForecastError::NegativeSales(self.avg_daily_sales));
        }
        if !(0..=MAX_LEAD_TIME_DAYS).contains(&self.lead_time_days) {
            return Err(ForecastError::InvalidLeadTime(self.lead_time_days));
        }
        for stock in &self.incoming_stock {
            check_finite("incoming_stock.quantity", stock.quantity)?;
            if stock.quantity <= 0.0 {
                return Err(ForecastError::NonPositiveDelivery {
                    date: stock.date,
                    quantity: stock.quantity,
                });
            }
        }
        if self.projection_days == 0 {
            return Err(ForecastError::ZeroHorizon);
        }
        if self.projection_days > MAX_PROJECTION_DAYS {
            return Err(ForecastError::HorizonTooLong(self.projection_days));
        }
        Ok(())
    }

    /// `validate`, plus a check that every projected day starting at
    /// `today` is a representable calendar date
    pub fn validate_at(&self, today: NaiveDate) -> ForecastResult<()> {
        self.validate()?;
        let last_offset = u64::from(self.projection_days - 1);
        if today.checked_add_days(Days::new(last_offset)).is_none() {
            return Err(ForecastError::HorizonPastCalendar {
                today,
                days: self.projection_days,
            });
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> ForecastResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::NonFiniteInput { field, value })
    }
}

/// Product listing entry as supplied by the store catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    pub current_inventory: f64,
    pub avg_daily_sales: f64,
}

/// Parse an ISO `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> ForecastResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        ForecastError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let input: ProjectionInput = serde_json::from_str(
            r#"{"current_inventory": 200, "avg_daily_sales": 10.5,
                "monthly_growth_rate": 1.1, "lead_time_days": 84}"#,
        )
        .unwrap();
        assert_eq!(input.projection_days, 365);
        assert!(input.incoming_stock.is_empty());
    }

    #[test]
    fn test_incoming_dates_deserialize_as_iso() {
        let stock: IncomingStock =
            serde_json::from_str(r#"{"date": "2025-03-01", "quantity": 500}"#).unwrap();
        assert_eq!(stock.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(stock.quantity, 500.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_growth() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let input = ProjectionInput::new(100.0, 1.0, rate, 7);
            assert!(matches!(input.validate(), Err(ForecastError::InvalidGrowthRate(_))));
        }
    }

    #[test]
    fn test_validate_accepts_negative_inventory() {
        let input = ProjectionInput::new(-25.0, 3.0, 1.0, 7);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_other_fields() {
        let input = ProjectionInput::new(100.0, -1.0, 1.0, 7);
        assert!(matches!(input.validate(), Err(ForecastError::NegativeSales(_))));

        let input = ProjectionInput::new(f64::NAN, 1.0, 1.0, 7);
        assert!(matches!(input.validate(), Err(ForecastError::NonFiniteInput { .. })));

        let input = ProjectionInput::new(100.0, 1.0, 1.0, 7).with_projection_days(0);
        assert!(matches!(input.validate(), Err(ForecastError::ZeroHorizon)));
    }

    #[test]
    fn test_validate_horizon_upper_bound() {
        let input = ProjectionInput::new(10.0, 1.0, 1.0, 7).with_projection_days(u32::MAX);
        assert!(matches!(input.validate(), Err(ForecastError::HorizonTooLong(u32::MAX))));

        let input = ProjectionInput::new(10.0, 1.0, 1.0, 7).with_projection_days(MAX_PROJECTION_DAYS);
        assert!(input.validate().is_ok());
        let input = input.with_projection_days(MAX_PROJECTION_DAYS + 1);
        assert!(matches!(input.validate(), Err(ForecastError::HorizonTooLong(_))));
    }

    #[test]
    fn test_validate_lead_time_range() {
        for lead in [i64::MIN, -1, MAX_LEAD_TIME_DAYS + 1, i64::MAX] {
            let input = ProjectionInput::new(0.0, 1.0, 1.0, lead);
            assert!(matches!(input.validate(), Err(ForecastError::InvalidLeadTime(l)) if l == lead));
        }
        assert!(ProjectionInput::new(0.0, 1.0, 1.0, 0).validate().is_ok());
        assert!(ProjectionInput::new(0.0, 1.0, 1.0, MAX_LEAD_TIME_DAYS).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_deliveries() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        for quantity in [0.0, -50.0] {
            let input = ProjectionInput::new(100.0, 1.0, 1.0, 7)
                .with_incoming_stock(vec![IncomingStock::new(day, quantity)]);
            assert!(matches!(
                input.validate(),
                Err(ForecastError::NonPositiveDelivery { .. })
            ));
        }
        let input = ProjectionInput::new(100.0, 1.0, 1.0, 7)
            .with_incoming_stock(vec![IncomingStock::new(day, 0.5)]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_at_end_of_calendar() {
        let input = ProjectionInput::new(100.0, 1.0, 1.0, 7);
        let near_end = NaiveDate::MAX - chrono::TimeDelta::days(10);
        assert!(matches!(
            input.validate_at(near_end),
            Err(ForecastError::HorizonPastCalendar { days: 365, .. })
        ));

        let fits = NaiveDate::MAX - chrono::TimeDelta::days(364);
        assert!(input.validate_at(fits).is_ok());
        assert!(input.with_projection_days(11).validate_at(near_end).is_ok());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(parse_date("02/29/2024"), Err(ForecastError::InvalidDate { .. })));
    }
}
