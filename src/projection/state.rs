//! Running state of a product during projection
//!
//! Holds the full-precision accumulators. Display rounding happens only when
//! a `DailyProjectionPoint` is emitted, never here.

use crate::product::ProjectionInput;

/// Nominal month length used to derive the daily growth factor
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Convert a monthly sales multiplier to a per-day multiplier.
///
/// Continuous compounding over a 30-day month; not calendar accurate.
pub fn daily_growth_rate(monthly_growth_rate: f64) -> f64 {
    monthly_growth_rate.powf(1.0 / DAYS_PER_MONTH)
}

/// State of a product at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current day offset from the reference date (0-indexed)
    pub day: u32,

    /// Running inventory, unclamped; may go negative
    pub inventory: f64,

    /// Sales velocity applied on the current day
    pub daily_sales: f64,

    /// Per-day growth multiplier
    pub daily_growth: f64,

    /// First day the running inventory reached zero
    pub stock_out_day: Option<u32>,
}

impl ProjectionState {
    /// Initialize state from the caller's snapshot at day 0
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            day: 0,
            inventory: input.current_inventory,
            daily_sales: input.avg_daily_sales,
            daily_growth: daily_growth_rate(input.monthly_growth_rate),
            stock_out_day: None,
        }
    }

    /// Add stock delivered today
    pub fn receive(&mut self, quantity: f64) {
        self.inventory += quantity;
    }

    /// Record today as the stock-out day if nothing is left before selling.
    /// Only the first such day is kept.
    pub fn check_stock_out(&mut self) {
        if self.inventory <= 0.0 && self.stock_out_day.is_none() {
            self.stock_out_day = Some(self.day);
        }
    }

    /// Subtract today's sales from the running inventory
    pub fn sell(&mut self) {
        self.inventory -= self.daily_sales;
    }

    /// Move to the next day. Growth is applied from the end of day 1 on, so
    /// days 0 and 1 both sell at the caller's baseline.
    pub fn advance_day(&mut self) {
        if self.day > 0 {
            self.daily_sales *= self.daily_growth;
        }
        self.day += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_daily_growth_rate() {
        assert_abs_diff_eq!(daily_growth_rate(1.1), 1.1f64.powf(1.0 / 30.0), epsilon = 1e-12);
        assert_abs_diff_eq!(daily_growth_rate(1.1), 1.003185, epsilon = 1e-5);
        assert_eq!(daily_growth_rate(1.0), 1.0);
        assert!(daily_growth_rate(0.9) < 1.0);
    }

    #[test]
    fn test_growth_skips_first_transition() {
        let input = ProjectionInput::new(100.0, 10.0, 1.1, 7);
        let mut state = ProjectionState::from_input(&input);

        state.advance_day();
        assert_eq!(state.day, 1);
        assert_eq!(state.daily_sales, 10.0);

        state.advance_day();
        assert_eq!(state.day, 2);
        assert!(state.daily_sales > 10.0);
    }

    #[test]
    fn test_stock_out_recorded_once() {
        let input = ProjectionInput::new(5.0, 5.0, 1.0, 7);
        let mut state = ProjectionState::from_input(&input);

        state.check_stock_out();
        assert_eq!(state.stock_out_day, None);
        state.sell();
        state.advance_day();

        state.check_stock_out();
        assert_eq!(state.stock_out_day, Some(1));
        state.sell();
        state.advance_day();

        state.receive(1.0);
        state.check_stock_out();
        assert_eq!(state.stock_out_day, Some(1));
        assert_eq!(state.inventory, -4.0);
    }
}
