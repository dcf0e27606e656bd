//! Extract loader: reads the six source extracts into Bronze tables.
//!
//! Each extract is a JSON array of rows materialized by the external
//! ingestion collaborator. A file that fails to parse is an extract-level
//! error; per-value malformation inside the domain (bad date encodings,
//! nulls) deserializes as `None` and is handled by the Silver rules.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::SourcePaths;
use crate::error::{Result, WarehouseError};

use super::BronzeTables;

/// Load one extract file as a JSON array of raw rows.
pub fn load_table<T: DeserializeOwned>(source_name: &str, path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| WarehouseError::Extract {
        source_name: source_name.to_string(),
        message: format!("cannot read {}: {}", path.display(), e),
    })?;

    let rows: Vec<T> = serde_json::from_str(&content).map_err(|e| WarehouseError::Extract {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;

    debug!(source = source_name, rows = rows.len(), "Loaded extract");
    Ok(rows)
}

/// Load all six source extracts into a fresh Bronze layer.
pub fn load_bronze(sources: &SourcePaths) -> Result<BronzeTables> {
    let tables = BronzeTables {
        customers: load_table("crm_customers", Path::new(&sources.crm_customers))?,
        products: load_table("crm_products", Path::new(&sources.crm_products))?,
        sales: load_table("crm_sales", Path::new(&sources.crm_sales))?,
        erp_customers: load_table("erp_customers", Path::new(&sources.erp_customers))?,
        erp_locations: load_table("erp_locations", Path::new(&sources.erp_locations))?,
        erp_categories: load_table("erp_categories", Path::new(&sources.erp_categories))?,
    };

    info!(rows = tables.row_count(), "Bronze extracts loaded");
    Ok(tables)
}
