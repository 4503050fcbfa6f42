//! Output structures for inventory projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round to two decimal places for display
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One simulated day of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProjectionPoint {
    /// Offset from the reference date
    pub day: u32,
    pub date: NaiveDate,
    /// Inventory after the day's deliveries, floored at zero, 2 dp
    pub inventory: f64,
    /// Sales velocity used that day, 2 dp
    pub daily_sales: f64,
    /// Quantity delivered on this exact day
    pub incoming_stock: f64,
}

impl DailyProjectionPoint {
    /// Build a display point from full-precision values
    pub fn new(day: u32, date: NaiveDate, inventory: f64, daily_sales: f64, incoming_stock: f64) -> Self {
        let rounded = round2(inventory);
        Self {
            day,
            date,
            // Avoid emitting -0.0 for tiny negative balances
            inventory: if rounded > 0.0 { rounded } else { 0.0 },
            daily_sales: round2(daily_sales),
            incoming_stock,
        }
    }
}

/// How soon a reorder has to be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderUrgency {
    /// Reorder deadline is today or already passed
    Critical,
    /// Reorder deadline is within the warning window
    Warning,
    Ok,
}

impl ReorderUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReorderUrgency::Critical => "critical",
            ReorderUrgency::Warning => "warning",
            ReorderUrgency::Ok => "ok",
        }
    }
}

impl std::fmt::Display for ReorderUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// First day with no stock left, if within the horizon
    pub stock_out_date: Option<NaiveDate>,
    pub days_until_stock_out: Option<u32>,

    /// Stock-out date minus lead time; may precede the reference date
    pub must_reorder_by: Option<NaiveDate>,
    pub reorder_urgency: ReorderUrgency,

    /// One point per simulated day
    pub daily_projection: Vec<DailyProjectionPoint>,
}

impl ProjectionResult {
    /// Whether the product runs out within the horizon
    pub fn stocks_out(&self) -> bool {
        self.days_until_stock_out.is_some()
    }

    /// Point for a given day offset
    pub fn point(&self, day: u32) -> Option<&DailyProjectionPoint> {
        self.daily_projection.get(day as usize)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_incoming: f64 = self.daily_projection.iter().map(|p| p.incoming_stock).sum();
        let delivery_days = self
            .daily_projection
            .iter()
            .filter(|p| p.incoming_stock > 0.0)
            .count() as u32;

        let final_inventory = self.daily_projection.last().map(|p| p.inventory).unwrap_or(0.0);
        let final_daily_sales = self.daily_projection.last().map(|p| p.daily_sales).unwrap_or(0.0);

        ProjectionSummary {
            total_days: self.daily_projection.len() as u32,
            total_incoming,
            delivery_days,
            final_inventory,
            final_daily_sales,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_days: u32,
    pub total_incoming: f64,
    pub delivery_days: u32,
    pub final_inventory: f64,
    pub final_daily_sales: f64,
}
