//! Load product snapshots and scheduled deliveries from CSV
//!
//! products.csv columns:
//!   product_id, title, vendor, current_inventory, avg_daily_sales
//!
//! incoming.csv columns:
//!   product_id, expected_date, quantity

use super::{parse_date, IncomingStock, ProductSnapshot};
use crate::error::ForecastResult;
use csv::{Reader, ReaderBuilder, Trim};
use log::debug;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Raw CSV row for the incoming-stock registry
#[derive(Debug, serde::Deserialize)]
struct IncomingRow {
    product_id: String,
    expected_date: String,
    quantity: f64,
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Load product snapshots from any reader
pub fn load_products_from_reader<R: Read>(reader: R) -> ForecastResult<Vec<ProductSnapshot>> {
    let mut csv_reader = csv_reader(reader);
    let mut products = Vec::new();

    for result in csv_reader.deserialize() {
        let mut product: ProductSnapshot = result?;
        if product.vendor.as_deref().is_some_and(str::is_empty) {
            product.vendor = None;
        }
        products.push(product);
    }

    debug!("loaded {} product snapshots", products.len());
    Ok(products)
}

/// Load product snapshots from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> ForecastResult<Vec<ProductSnapshot>> {
    let file = std::fs::File::open(path)?;
    load_products_from_reader(file)
}

/// Load scheduled deliveries from any reader, grouped by product id.
///
/// File order is preserved within each product.
pub fn load_incoming_from_reader<R: Read>(
    reader: R,
) -> ForecastResult<HashMap<String, Vec<IncomingStock>>> {
    let mut csv_reader = csv_reader(reader);
    let mut by_product: HashMap<String, Vec<IncomingStock>> = HashMap::new();
    let mut rows = 0usize;

    for result in csv_reader.deserialize() {
        let row: IncomingRow = result?;
        let date = parse_date(&row.expected_date)?;
        by_product
            .entry(row.product_id)
            .or_default()
            .push(IncomingStock::new(date, row.quantity));
        rows += 1;
    }

    debug!("loaded {} incoming stock rows for {} products", rows, by_product.len());
    Ok(by_product)
}

/// Load scheduled deliveries from a CSV file
pub fn load_incoming<P: AsRef<Path>>(path: P) -> ForecastResult<HashMap<String, Vec<IncomingStock>>> {
    let file = std::fs::File::open(path)?;
    load_incoming_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use chrono::NaiveDate;

    #[test]
    fn test_load_products() {
        let data = "\
product_id,title,vendor,current_inventory,avg_daily_sales
gid-1, Root Stimulator ,GreenLeaf,500,50
gid-2,Bloom Booster,,25000,170.5
";
        let products = load_products_from_reader(data.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Root Stimulator");
        assert_eq!(products[0].vendor.as_deref(), Some("GreenLeaf"));
        assert_eq!(products[1].vendor, None);
        assert_eq!(products[1].avg_daily_sales, 170.5);
    }

    #[test]
    fn test_load_incoming_groups_by_product() {
        let data = "\
product_id,expected_date,quantity
gid-1,2025-01-10,100
gid-2,2025-01-12,40
gid-1,2025-01-10,25
";
        let incoming = load_incoming_from_reader(data.as_bytes()).unwrap();
        assert_eq!(incoming.len(), 2);

        let first = &incoming["gid-1"];
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(first[1].quantity, 25.0);
    }

    #[test]
    fn test_load_incoming_bad_date() {
        let data = "product_id,expected_date,quantity\ngid-1,10/01/2025,100\n";
        let err = load_incoming_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidDate { .. }));
    }

    #[test]
    fn test_load_products_bad_number() {
        let data = "product_id,title,vendor,current_inventory,avg_daily_sales\ngid-1,A,B,lots,1\n";
        assert!(matches!(
            load_products_from_reader(data.as_bytes()),
            Err(ForecastError::Csv(_))
        ));
    }
}
