//! JSON settings loader
//!
//! ```json
//! {
//!   "shop": { "lead_time_days": 84, "monthly_growth_rate": 1.1 },
//!   "products": { "gid-1": { "lead_time_days": 28 } }
//! }
//! ```

use super::{ProductSettings, ShopSettings};
use crate::error::ForecastResult;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Shop defaults plus per-product overrides keyed by product id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub shop: ShopSettings,
    #[serde(default)]
    pub products: HashMap<String, ProductSettings>,
}

/// Load settings from any reader
pub fn load_settings_from_reader<R: Read>(reader: R) -> ForecastResult<SettingsFile> {
    let settings: SettingsFile = serde_json::from_reader(reader)?;
    debug!("loaded settings with {} product overrides", settings.products.len());
    Ok(settings)
}

/// Load settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> ForecastResult<SettingsFile> {
    let file = std::fs::File::open(path)?;
    load_settings_from_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_partial_file_uses_defaults() {
        let json = r#"{"shop": {"lead_time_days": 56}, "products": {"gid-9": {"monthly_growth_rate": 0.95}}}"#;
        let settings = load_settings_from_reader(json.as_bytes()).unwrap();

        assert_eq!(settings.shop.lead_time_days, 56);
        assert_eq!(settings.shop.monthly_growth_rate, 1.1);
        assert_eq!(settings.products["gid-9"].monthly_growth_rate, Some(0.95));
        assert_eq!(settings.products["gid-9"].lead_time_days, None);
    }

    #[test]
    fn test_empty_object() {
        let settings = load_settings_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(settings, SettingsFile::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_settings_from_reader("{\"shop\": ".as_bytes()),
            Err(ForecastError::Json(_))
        ));
    }
}
