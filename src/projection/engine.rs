//! Core projection engine for daily inventory projections

use chrono::{NaiveDate, TimeDelta};
use log::{debug, warn};
use std::collections::HashMap;

use super::daily::{DailyProjectionPoint, ProjectionResult, ReorderUrgency};
use super::state::ProjectionState;
use crate::product::{IncomingStock, ProjectionInput, DEFAULT_PROJECTION_DAYS};

/// Default number of days left to reorder below which urgency is `warning`
pub const DEFAULT_WARNING_DAYS: i64 = 14;

/// Reorder-day cut-offs for urgency classification.
///
/// `reorder_day` is days until stock-out minus lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgencyThresholds {
    /// `reorder_day <= critical_days` is critical
    pub critical_days: i64,
    /// `critical_days < reorder_day <= warning_days` is warning
    pub warning_days: i64,
}

impl UrgencyThresholds {
    /// Default thresholds with a different warning window
    pub fn with_warning_days(warning_days: i64) -> Self {
        Self {
            warning_days,
            ..Self::default()
        }
    }

    pub fn classify(&self, reorder_day: i64) -> ReorderUrgency {
        if reorder_day <= self.critical_days {
            ReorderUrgency::Critical
        } else if reorder_day <= self.warning_days {
            ReorderUrgency::Warning
        } else {
            ReorderUrgency::Ok
        }
    }
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            critical_days: 0,
            warning_days: DEFAULT_WARNING_DAYS,
        }
    }
}

/// Configuration for projection runs
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Horizon used when building inputs from product snapshots
    pub projection_days: u32,

    /// Urgency classification cut-offs
    pub thresholds: UrgencyThresholds,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_days: DEFAULT_PROJECTION_DAYS,
            thresholds: UrgencyThresholds::default(),
        }
    }
}

/// Sum deliveries by day offset from `today`. Deliveries dated before
/// `today` are dropped.
pub fn bucket_incoming(incoming: &[IncomingStock], today: NaiveDate) -> HashMap<i64, f64> {
    let mut by_day: HashMap<i64, f64> = HashMap::new();
    for stock in incoming {
        let offset = stock.date.signed_duration_since(today).num_days();
        if offset >= 0 {
            *by_day.entry(offset).or_insert(0.0) += stock.quantity;
        }
    }
    by_day
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a projection relative to the local calendar date
    pub fn project_today(&self, input: &ProjectionInput) -> ProjectionResult {
        self.project(input, chrono::Local::now().date_naive())
    }

    /// Run a projection with `today` as day 0.
    ///
    /// The input is expected to have passed `ProjectionInput::validate_at`;
    /// unvalidated input never panics but may yield NaN sales or a sequence
    /// cut short at the last calendar date.
    pub fn project(&self, input: &ProjectionInput, today: NaiveDate) -> ProjectionResult {
        let incoming_by_day = bucket_incoming(&input.incoming_stock, today);
        let mut state = ProjectionState::from_input(input);

        debug!(
            "projecting {} days from {}: daily growth {:.6}, {} delivery days",
            input.projection_days,
            today,
            state.daily_growth,
            incoming_by_day.len()
        );

        let mut daily_projection = Vec::with_capacity(input.projection_days as usize);

        for (day, date) in (0..input.projection_days).zip(today.iter_days()) {
            let incoming = incoming_by_day.get(&i64::from(day)).copied().unwrap_or(0.0);
            state.receive(incoming);

            daily_projection.push(DailyProjectionPoint::new(
                day,
                date,
                state.inventory,
                state.daily_sales,
                incoming,
            ));

            state.check_stock_out();
            state.sell();
            state.advance_day();
        }

        if daily_projection.len() < input.projection_days as usize {
            warn!(
                "projection from {} stopped after {} of {} days at the end of the calendar",
                today,
                daily_projection.len(),
                input.projection_days
            );
        }

        let days_until_stock_out = state.stock_out_day;
        let stock_out_date = days_until_stock_out
            .and_then(|day| daily_projection.get(day as usize))
            .map(|point| point.date);

        let (must_reorder_by, reorder_urgency) = match (days_until_stock_out, stock_out_date) {
            (Some(day), Some(date)) => {
                let reorder_day = i64::from(day).saturating_sub(input.lead_time_days);
                let deadline = TimeDelta::try_days(input.lead_time_days)
                    .and_then(|lead| date.checked_sub_signed(lead));
                if deadline.is_none() {
                    warn!("lead time of {} days is out of calendar range", input.lead_time_days);
                }
                (deadline, self.config.thresholds.classify(reorder_day))
            }
            _ => (None, ReorderUrgency::Ok),
        };

        ProjectionResult {
            stock_out_date,
            days_until_stock_out,
            must_reorder_by,
            reorder_urgency,
            daily_projection,
        }
    }
}
