//! Forecast settings: per-shop defaults with per-product overrides

pub mod loader;

pub use loader::{load_settings, load_settings_from_reader, SettingsFile};

use serde::{Deserialize, Serialize};

/// Default supplier lead time (12 weeks)
pub const DEFAULT_LEAD_TIME_DAYS: i64 = 84;
/// Default sales lookback window
pub const DEFAULT_SALE_RANGE_DAYS: u32 = 90;
/// Default monthly growth multiplier
pub const DEFAULT_MONTHLY_GROWTH_RATE: f64 = 1.1;
/// Default alert threshold in days
pub const DEFAULT_ALERT_THRESHOLD_DAYS: i64 = 14;

fn default_lead_time_days() -> i64 { DEFAULT_LEAD_TIME_DAYS }
fn default_sale_range_days() -> u32 { DEFAULT_SALE_RANGE_DAYS }
fn default_monthly_growth_rate() -> f64 { DEFAULT_MONTHLY_GROWTH_RATE }
fn default_alert_threshold() -> i64 { DEFAULT_ALERT_THRESHOLD_DAYS }

/// Shop-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(default = "default_lead_time_days")]
    pub lead_time_days: i64,

    /// Lookback window for the sales average; used by the sales aggregator,
    /// not by the engine
    #[serde(default = "default_sale_range_days")]
    pub sale_range_days: u32,

    #[serde(default = "default_monthly_growth_rate")]
    pub monthly_growth_rate: f64,

    /// Not applied to urgency unless the caller opts in with
    /// `ResolvedSettings::thresholds`
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: i64,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            sale_range_days: DEFAULT_SALE_RANGE_DAYS,
            monthly_growth_rate: DEFAULT_MONTHLY_GROWTH_RATE,
            alert_threshold: DEFAULT_ALERT_THRESHOLD_DAYS,
        }
    }
}

/// Per-product overrides; unset fields fall back to the shop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSettings {
    #[serde(default)]
    pub lead_time_days: Option<i64>,
    #[serde(default)]
    pub sale_range_days: Option<u32>,
    #[serde(default)]
    pub monthly_growth_rate: Option<f64>,
}

/// Effective settings for one product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSettings {
    pub lead_time_days: i64,
    pub sale_range_days: u32,
    pub monthly_growth_rate: f64,
    pub alert_threshold: i64,
}

impl ResolvedSettings {
    /// Urgency thresholds using the shop alert threshold as warning window
    pub fn thresholds(&self) -> crate::projection::UrgencyThresholds {
        crate::projection::UrgencyThresholds::with_warning_days(self.alert_threshold)
    }
}

/// Resolve each field from the product override, falling back to the shop
pub fn resolve(shop: &ShopSettings, product: Option<&ProductSettings>) -> ResolvedSettings {
    let overrides = product.cloned().unwrap_or_default();
    ResolvedSettings {
        lead_time_days: overrides.lead_time_days.unwrap_or(shop.lead_time_days),
        sale_range_days: overrides.sale_range_days.unwrap_or(shop.sale_range_days),
        monthly_growth_rate: overrides.monthly_growth_rate.unwrap_or(shop.monthly_growth_rate),
        alert_threshold: shop.alert_threshold,
    }
}
