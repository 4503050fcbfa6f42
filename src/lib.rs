//! Stock-Out Forecast - Day-by-day inventory projection for retail products
//!
//! This library provides:
//! - A deterministic daily inventory simulation with compounding sales growth
//! - Scheduled incoming stock merged by calendar day
//! - Stock-out detection, reorder deadlines and urgency classification
//! - Shop/product settings resolution and parallel catalog runs
//! - Presentation shaping (chart window, weekly table, risk badges)

pub mod error;
pub mod product;
pub mod projection;
pub mod settings;
pub mod report;
pub mod catalog;

// Re-export commonly used types
pub use error::{ForecastError, ForecastResult};
pub use product::{IncomingStock, ProductSnapshot, ProjectionInput};
pub use projection::{DailyProjectionPoint, ProjectionConfig, ProjectionEngine, ProjectionResult, ReorderUrgency, UrgencyThresholds};
pub use settings::{ProductSettings, ShopSettings};
pub use catalog::{CatalogRow, CatalogRunner};
