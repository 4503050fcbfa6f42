//! Product snapshots, projection inputs, and their CSV loaders

mod data;
pub mod loader;

pub use data::{
    parse_date, IncomingStock, ProductSnapshot, ProjectionInput, DEFAULT_PROJECTION_DAYS,
    MAX_LEAD_TIME_DAYS, MAX_PROJECTION_DAYS,
};
pub use loader::{load_incoming, load_incoming_from_reader, load_products, load_products_from_reader};
