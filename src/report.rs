//! Presentation shaping for projection results
//!
//! Selects and labels the parts of a result that listing pages, charts and
//! tables show. Nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::projection::{DailyProjectionPoint, ProjectionResult, ReorderUrgency};

/// Days charted past the stock-out day
pub const CHART_DAYS_AFTER_STOCK_OUT: usize = 30;
/// Days charted when there is no stock-out
pub const CHART_DAYS_NO_STOCK_OUT: usize = 180;
/// Sampling interval of the tabular view
pub const TABLE_INTERVAL_DAYS: usize = 7;
/// Maximum rows in the tabular view
pub const TABLE_MAX_ROWS: usize = 53;

/// Points to chart: through 30 days past stock-out, or the first 180 days
pub fn chart_window(result: &ProjectionResult) -> &[DailyProjectionPoint] {
    let points = &result.daily_projection;
    let end = match result.days_until_stock_out {
        Some(day) => day as usize + CHART_DAYS_AFTER_STOCK_OUT,
        None => CHART_DAYS_NO_STOCK_OUT,
    };
    &points[..end.min(points.len())]
}

/// Every seventh point plus the last one
pub fn weekly_table(result: &ProjectionResult) -> Vec<&DailyProjectionPoint> {
    let last = result.daily_projection.len().saturating_sub(1);
    result
        .daily_projection
        .iter()
        .enumerate()
        .filter(|(i, _)| i % TABLE_INTERVAL_DAYS == 0 || *i == last)
        .map(|(_, point)| point)
        .take(TABLE_MAX_ROWS)
        .collect()
}

/// Days until stock-out, or `"{horizon}+"` when it lies beyond the horizon
pub fn stock_out_label(result: &ProjectionResult) -> String {
    match result.days_until_stock_out {
        Some(days) => days.to_string(),
        None => format!("{}+", result.daily_projection.len()),
    }
}

/// Status badge shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBadge {
    OutOfStock,
    ReorderNow,
    ReorderSoon,
    WellStocked,
    Ok,
}

impl RiskBadge {
    pub fn new(urgency: ReorderUrgency, days_until_stock_out: Option<u32>) -> Self {
        match (urgency, days_until_stock_out) {
            (ReorderUrgency::Critical, Some(0)) => RiskBadge::OutOfStock,
            (ReorderUrgency::Critical, _) => RiskBadge::ReorderNow,
            (ReorderUrgency::Warning, _) => RiskBadge::ReorderSoon,
            (ReorderUrgency::Ok, None) => RiskBadge::WellStocked,
            (ReorderUrgency::Ok, Some(_)) => RiskBadge::Ok,
        }
    }

    pub fn from_result(result: &ProjectionResult) -> Self {
        Self::new(result.reorder_urgency, result.days_until_stock_out)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBadge::OutOfStock => "Out of Stock",
            RiskBadge::ReorderNow => "Reorder Now",
            RiskBadge::ReorderSoon => "Reorder Soon",
            RiskBadge::WellStocked => "Well Stocked",
            RiskBadge::Ok => "OK",
        }
    }
}

impl std::fmt::Display for RiskBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything listed by urgency
pub trait UrgencyRanked {
    fn urgency(&self) -> ReorderUrgency;
    fn days_until_stock_out(&self) -> Option<u32>;
}

impl UrgencyRanked for ProjectionResult {
    fn urgency(&self) -> ReorderUrgency {
        self.reorder_urgency
    }

    fn days_until_stock_out(&self) -> Option<u32> {
        self.days_until_stock_out
    }
}

/// Order critical, warning, ok; then soonest stock-out first, none last
pub fn sort_by_urgency<T: UrgencyRanked>(rows: &mut [T]) {
    rows.sort_by_key(|row| {
        (
            row.urgency(),
            row.days_until_stock_out().is_none(),
            row.days_until_stock_out(),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProjectionInput;
    use crate::projection::ProjectionEngine;
    use chrono::NaiveDate;

    fn project(input: ProjectionInput) -> ProjectionResult {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        ProjectionEngine::default().project(&input, today)
    }

    #[test]
    fn test_chart_window_after_stock_out() {
        let result = project(ProjectionInput::new(200.0, 100.0, 1.0, 84));
        assert_eq!(chart_window(&result).len(), 32);

        let result = project(ProjectionInput::new(200.0, 1.0, 1.0, 84));
        // Stock-out on day 200, window runs to the horizon at most
        assert_eq!(chart_window(&result).len(), 230);

        let result = project(ProjectionInput::new(350.0, 1.0, 1.0, 84));
        assert_eq!(chart_window(&result).len(), 365);
    }

    #[test]
    fn test_chart_window_without_stock_out() {
        let result = project(ProjectionInput::new(1e6, 1.0, 1.0, 84));
        assert_eq!(chart_window(&result).len(), 180);

        let short = project(ProjectionInput::new(1e6, 1.0, 1.0, 84).with_projection_days(60));
        assert_eq!(chart_window(&short).len(), 60);
    }

    #[test]
    fn test_weekly_table() {
        let result = project(ProjectionInput::new(1e6, 1.0, 1.0, 84));
        let rows = weekly_table(&result);

        // Days 0, 7, ..., 364; the last day is itself a multiple of seven
        assert_eq!(rows.len(), 53);
        assert_eq!(rows[1].day, 7);
        assert_eq!(rows.last().map(|p| p.day), Some(364));

        let short = project(ProjectionInput::new(1e6, 1.0, 1.0, 84).with_projection_days(15));
        let days: Vec<u32> = weekly_table(&short).iter().map(|p| p.day).collect();
        assert_eq!(days, vec![0, 7, 14]);
    }

    #[test]
    fn test_stock_out_label() {
        assert_eq!(stock_out_label(&project(ProjectionInput::new(200.0, 100.0, 1.0, 84))), "2");
        assert_eq!(stock_out_label(&project(ProjectionInput::new(1e6, 1.0, 1.0, 84))), "365+");
    }

    #[test]
    fn test_badges() {
        assert_eq!(RiskBadge::new(ReorderUrgency::Critical, Some(0)), RiskBadge::OutOfStock);
        assert_eq!(RiskBadge::new(ReorderUrgency::Critical, Some(3)), RiskBadge::ReorderNow);
        assert_eq!(RiskBadge::new(ReorderUrgency::Warning, Some(90)), RiskBadge::ReorderSoon);
        assert_eq!(RiskBadge::new(ReorderUrgency::Ok, None), RiskBadge::WellStocked);
        assert_eq!(RiskBadge::new(ReorderUrgency::Ok, Some(200)).label(), "OK");
        assert_eq!(RiskBadge::OutOfStock.to_string(), "Out of Stock");
    }

    #[test]
    fn test_sort_by_urgency() {
        let mut results = vec![
            project(ProjectionInput::new(1e6, 1.0, 1.0, 84)),
            project(ProjectionInput::new(300.0, 1.0, 1.0, 84)),
            project(ProjectionInput::new(10.0, 1.0, 1.0, 84)),
            project(ProjectionInput::new(90.0, 1.0, 1.0, 84)),
            project(ProjectionInput::new(200.0, 1.0, 1.0, 84)),
        ];
        sort_by_urgency(&mut results);

        let order: Vec<(ReorderUrgency, Option<u32>)> = results
            .iter()
            .map(|r| (r.reorder_urgency, r.days_until_stock_out))
            .collect();
        assert_eq!(
            order,
            vec![
                (ReorderUrgency::Critical, Some(10)),
                (ReorderUrgency::Warning, Some(90)),
                (ReorderUrgency::Ok, Some(200)),
                (ReorderUrgency::Ok, Some(300)),
                (ReorderUrgency::Ok, None),
            ]
        );
    }
}
