//! Projection engine for daily inventory projections

mod state;
mod engine;
mod daily;

pub use state::{daily_growth_rate, ProjectionState, DAYS_PER_MONTH};
pub use engine::{bucket_incoming, ProjectionEngine, ProjectionConfig, UrgencyThresholds, DEFAULT_WARNING_DAYS};
pub use daily::{DailyProjectionPoint, ProjectionResult, ProjectionSummary, ReorderUrgency};
