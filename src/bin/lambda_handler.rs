//! AWS Lambda handler for running stock-out projections
//!
//! Accepts a product snapshot as JSON and returns the projection together
//! with the display fields a product page needs (badge, stock-out label,
//! chart window and weekly table).

use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use stockout_forecast::product::{IncomingStock, DEFAULT_PROJECTION_DAYS};
use stockout_forecast::projection::{
    DailyProjectionPoint, ProjectionConfig, ProjectionEngine, ProjectionResult, UrgencyThresholds,
    DEFAULT_WARNING_DAYS,
};
use stockout_forecast::report::{chart_window, stock_out_label, weekly_table, RiskBadge};
use stockout_forecast::settings::{DEFAULT_LEAD_TIME_DAYS, DEFAULT_MONTHLY_GROWTH_RATE};
use stockout_forecast::ProjectionInput;

/// Input for one projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    pub current_inventory: f64,

    #[serde(default)]
    pub avg_daily_sales: f64,

    #[serde(default = "default_growth_rate")]
    pub monthly_growth_rate: f64,

    #[serde(default = "default_lead_time")]
    pub lead_time_days: i64,

    #[serde(default)]
    pub incoming_stock: Vec<IncomingStock>,

    #[serde(default = "default_projection_days")]
    pub projection_days: u32,

    /// Day 0 of the projection (default: the function's local date)
    #[serde(default)]
    pub today: Option<NaiveDate>,

    #[serde(default)]
    pub critical_days: i64,

    #[serde(default = "default_warning_days")]
    pub warning_days: i64,
}

fn default_growth_rate() -> f64 { DEFAULT_MONTHLY_GROWTH_RATE }
fn default_lead_time() -> i64 { DEFAULT_LEAD_TIME_DAYS }
fn default_projection_days() -> u32 { DEFAULT_PROJECTION_DAYS }
fn default_warning_days() -> i64 { DEFAULT_WARNING_DAYS }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub today: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<RiskBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_out_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chart: Vec<DailyProjectionPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekly: Vec<DailyProjectionPoint>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectionRequest {
    fn input(&self) -> ProjectionInput {
        ProjectionInput::new(
            self.current_inventory,
            self.avg_daily_sales,
            self.monthly_growth_rate,
            self.lead_time_days,
        )
        .with_incoming_stock(self.incoming_stock.clone())
        .with_projection_days(self.projection_days)
    }

    fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            projection_days: self.projection_days,
            thresholds: UrgencyThresholds {
                critical_days: self.critical_days,
                warning_days: self.warning_days,
            },
        }
    }
}

fn respond(request: &ProjectionRequest) -> ProjectionResponse {
    let start = std::time::Instant::now();
    let today = request
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let input = request.input();

    if let Err(e) = input.validate_at(today) {
        log::warn!("rejected projection request: {}", e);
        return ProjectionResponse {
            today,
            badge: None,
            stock_out_label: None,
            projection: None,
            chart: Vec::new(),
            weekly: Vec::new(),
            execution_time_ms: start.elapsed().as_millis() as u64,
            error: Some(e.to_string()),
        };
    }

    let engine = ProjectionEngine::new(request.config());
    let result = engine.project(&input, today);

    ProjectionResponse {
        today,
        badge: Some(RiskBadge::from_result(&result)),
        stock_out_label: Some(stock_out_label(&result)),
        chart: chart_window(&result).to_vec(),
        weekly: weekly_table(&result).into_iter().cloned().collect(),
        projection: Some(result),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    Ok(respond(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
