//! Catalog runner for batch projections
//!
//! Holds the shop settings, per-product overrides and the delivery schedule
//! once, then projects any number of product snapshots against a reference
//! date in parallel.

use chrono::NaiveDate;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::{ForecastError, ForecastResult};
use crate::product::{IncomingStock, ProductSnapshot, ProjectionInput};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ReorderUrgency};
use crate::report::{sort_by_urgency, RiskBadge, UrgencyRanked};
use crate::settings::{resolve, ProductSettings, SettingsFile, ShopSettings};

/// One listing row for a projected product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub product_id: String,
    pub title: String,
    pub vendor: Option<String>,
    pub current_inventory: f64,
    pub avg_daily_sales: f64,
    pub days_until_stock_out: Option<u32>,
    pub stock_out_date: Option<NaiveDate>,
    pub must_reorder_by: Option<NaiveDate>,
    pub reorder_urgency: ReorderUrgency,
    pub badge: RiskBadge,
}

impl CatalogRow {
    fn new(product: &ProductSnapshot, result: &ProjectionResult) -> Self {
        Self {
            product_id: product.product_id.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            current_inventory: product.current_inventory,
            avg_daily_sales: product.avg_daily_sales,
            days_until_stock_out: result.days_until_stock_out,
            stock_out_date: result.stock_out_date,
            must_reorder_by: result.must_reorder_by,
            reorder_urgency: result.reorder_urgency,
            badge: RiskBadge::from_result(result),
        }
    }
}

impl UrgencyRanked for CatalogRow {
    fn urgency(&self) -> ReorderUrgency {
        self.reorder_urgency
    }

    fn days_until_stock_out(&self) -> Option<u32> {
        self.days_until_stock_out
    }
}

/// Pre-loaded runner for projecting a whole catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogRunner {
    shop: ShopSettings,
    overrides: HashMap<String, ProductSettings>,
    incoming: HashMap<String, Vec<IncomingStock>>,
    engine: ProjectionEngine,
}

impl CatalogRunner {
    /// Create runner with shop defaults and no overrides or deliveries
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
            ..Self::default()
        }
    }

    /// Use shop defaults and overrides from a settings file
    pub fn with_settings(mut self, settings: SettingsFile) -> Self {
        self.shop = settings.shop;
        self.overrides = settings.products;
        self
    }

    /// Use a delivery schedule keyed by product id
    pub fn with_incoming(mut self, incoming: HashMap<String, Vec<IncomingStock>>) -> Self {
        self.incoming = incoming;
        self
    }

    pub fn shop(&self) -> &ShopSettings {
        &self.shop
    }

    /// Build the engine input for one product from its resolved settings
    pub fn input_for(&self, product: &ProductSnapshot) -> ProjectionInput {
        let settings = resolve(&self.shop, self.overrides.get(&product.product_id));
        let incoming = self
            .incoming
            .get(&product.product_id)
            .cloned()
            .unwrap_or_default();

        ProjectionInput::new(
            product.current_inventory,
            product.avg_daily_sales,
            settings.monthly_growth_rate,
            settings.lead_time_days,
        )
        .with_incoming_stock(incoming)
        .with_projection_days(self.engine.config().projection_days)
    }

    /// Validate and project a single product
    pub fn project(&self, product: &ProductSnapshot, today: NaiveDate) -> ForecastResult<ProjectionResult> {
        let input = self.input_for(product);
        input.validate_at(today)?;
        Ok(self.engine.project(&input, today))
    }

    /// Project one product by id from a listing
    pub fn project_by_id(
        &self,
        products: &[ProductSnapshot],
        product_id: &str,
        today: NaiveDate,
    ) -> ForecastResult<ProjectionResult> {
        let product = products
            .iter()
            .find(|p| p.product_id == product_id)
            .ok_or_else(|| ForecastError::UnknownProduct(product_id.to_string()))?;
        self.project(product, today)
    }

    /// Project every product in parallel, returning rows ordered by urgency.
    /// Products that fail validation are skipped with a warning.
    pub fn run(&self, products: &[ProductSnapshot], today: NaiveDate) -> Vec<CatalogRow> {
        let start = Instant::now();

        let mut rows: Vec<CatalogRow> = products
            .par_iter()
            .filter_map(|product| match self.project(product, today) {
                Ok(result) => Some(CatalogRow::new(product, &result)),
                Err(e) => {
                    warn!("skipping product {}: {}", product.product_id, e);
                    None
                }
            })
            .collect();

        sort_by_urgency(&mut rows);

        info!(
            "projected {} of {} products from {} in {:?}",
            rows.len(),
            products.len(),
            today,
            start.elapsed()
        );
        rows
    }
}

/// Distinct vendors, sorted, ignoring products without one
pub fn vendors(products: &[ProductSnapshot]) -> Vec<String> {
    let mut vendors: Vec<String> = products.iter().filter_map(|p| p.vendor.clone()).collect();
    vendors.sort();
    vendors.dedup();
    vendors
}

/// Rows matching an optional case-insensitive title search and exact vendor
pub fn filter_rows<'a>(
    rows: &'a [CatalogRow],
    search: Option<&str>,
    vendor: Option<&str>,
) -> Vec<&'a CatalogRow> {
    let needle = search.map(str::to_lowercase);
    rows.iter()
        .filter(|row| {
            needle
                .as_deref()
                .map_or(true, |n| row.title.to_lowercase().contains(n))
        })
        .filter(|row| vendor.map_or(true, |v| row.vendor.as_deref() == Some(v)))
        .collect()
}
