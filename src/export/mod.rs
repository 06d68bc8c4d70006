//! Export module for Atlas
//!
//! - JSON: the merchant profile with derived status (machine-readable)
//! - YAML: the same export, human-readable
//! - CSV: the customer list (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_customers_csv;
pub use json::{export_profile_json, ProfileExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_profile_yaml;
