//! Silver layer: per-entity cleaning and standardization.
//!
//! Every rule in this module is a total function over its input domain. No
//! row is ever dropped for a data-quality violation except the explicit
//! null-business-id filter on customers; everything else is corrected
//! in-place or left for the detection-only audit to report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bronze::BronzeTables;
use crate::domain::{Customer, ErpCategory, ErpCustomer, ErpLocation, Product, SalesLine};

pub mod audit;
pub mod customer;
pub mod erp;
pub mod product;
pub mod sales;

/// One complete Silver rebuild. Swapped into the store atomically so
/// readers never observe a mix of old and new rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SilverSnapshot {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<SalesLine>,
    pub erp_customers: Vec<ErpCustomer>,
    pub erp_locations: Vec<ErpLocation>,
    pub erp_categories: Vec<ErpCategory>,
}

impl SilverSnapshot {
    pub fn row_count(&self) -> usize {
        self.customers.len()
            + self.products.len()
            + self.sales.len()
            + self.erp_customers.len()
            + self.erp_locations.len()
            + self.erp_categories.len()
    }
}

/// The cleaning and standardization engine. The processing date is injected
/// so date-sanity rules stay deterministic under test.
pub struct CleaningEngine {
    as_of_date: NaiveDate,
}

impl CleaningEngine {
    pub fn new(as_of_date: NaiveDate) -> Self {
        Self { as_of_date }
    }

    /// Rebuild the entire Silver layer from the current Bronze tables.
    /// The six entities are independent until the join stage, so the order
    /// here carries no meaning.
    pub fn run(&self, bronze: &BronzeTables) -> SilverSnapshot {
        let snapshot = SilverSnapshot {
            customers: customer::clean_customers(&bronze.customers),
            products: product::clean_products(&bronze.products),
            sales: sales::clean_sales(&bronze.sales),
            erp_customers: erp::clean_erp_customers(&bronze.erp_customers, self.as_of_date),
            erp_locations: erp::clean_erp_locations(&bronze.erp_locations),
            erp_categories: erp::clean_erp_categories(&bronze.erp_categories),
        };

        info!(
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            "Silver rebuild complete"
        );
        snapshot
    }
}
