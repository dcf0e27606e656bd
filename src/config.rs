use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::fs;

use crate::error::{Result, WarehouseError};

/// Warehouse configuration loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Processing date used by date-sanity rules (e.g. the birthdate
    /// future-check). Injected rather than read from the environment so a
    /// refresh over fixed input is fully deterministic. Defaults to today.
    pub as_of_date: Option<NaiveDate>,
    pub sources: SourcePaths,
    pub output: Option<OutputConfig>,
}

/// File paths for the six source extracts.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePaths {
    pub crm_customers: String,
    pub crm_products: String,
    pub crm_sales: String,
    pub erp_customers: String,
    pub erp_locations: String,
    pub erp_categories: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where the Gold views are exported as JSON after a refresh.
    pub dir: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            WarehouseError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_default() -> Result<Self> {
        Self::load("config.toml")
    }

    /// The effective processing date for this run.
    pub fn effective_as_of_date(&self) -> NaiveDate {
        self.as_of_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_parses_with_explicit_as_of_date() {
        let toml_src = r#"
            as_of_date = "2026-01-15"

            [sources]
            crm_customers = "data/cust_info.json"
            crm_products = "data/prd_info.json"
            crm_sales = "data/sales_details.json"
            erp_customers = "data/cust_az12.json"
            erp_locations = "data/loc_a101.json"
            erp_categories = "data/px_cat_g1v2.json"

            [output]
            dir = "output"
        "#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", toml_src).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config.effective_as_of_date(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        assert_eq!(config.sources.crm_sales, "data/sales_details.json");
        assert_eq!(config.output.unwrap().dir, "output");
    }

    #[test]
    fn test_as_of_date_defaults_to_today() {
        let toml_src = r#"
            [sources]
            crm_customers = "a.json"
            crm_products = "b.json"
            crm_sales = "c.json"
            erp_customers = "d.json"
            erp_locations = "e.json"
            erp_categories = "f.json"
        "#;

        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.effective_as_of_date(), Utc::now().date_naive());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = Config::load("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, WarehouseError::Config(_)));
    }
}
