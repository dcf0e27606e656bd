//! Bronze layer: untransformed mirror of the six source extracts.
//!
//! Field names match the source system column names exactly so that raw
//! extracts deserialize without renaming. No cleaning happens here; every
//! value a source can emit (nulls included) must round-trip untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod extract;

/// Raw CRM customer row (`cust_info`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCustomer {
    pub cst_id: Option<i64>,
    pub cst_key: Option<String>,
    pub cst_firstname: Option<String>,
    pub cst_lastname: Option<String>,
    pub cst_marital_status: Option<String>,
    pub cst_gndr: Option<String>,
    pub cst_create_date: Option<NaiveDate>,
}

/// Raw CRM product row (`prd_info`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub prd_id: Option<i64>,
    pub prd_key: Option<String>,
    pub prd_nm: Option<String>,
    pub prd_cost: Option<i64>,
    pub prd_line: Option<String>,
    pub prd_start_dt: Option<NaiveDate>,
    pub prd_end_dt: Option<NaiveDate>,
}

/// Raw CRM sales transaction line (`sales_details`). Dates arrive as
/// 8-digit YYYYMMDD integers, or zero/garbage when the source had none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSale {
    pub sls_ord_num: Option<String>,
    pub sls_prd_key: Option<String>,
    pub sls_cust_id: Option<i64>,
    pub sls_order_dt: Option<i64>,
    pub sls_ship_dt: Option<i64>,
    pub sls_due_dt: Option<i64>,
    pub sls_sales: Option<i64>,
    pub sls_quantity: Option<i64>,
    pub sls_price: Option<i64>,
}

/// Raw ERP customer demographics row (`cust_az12`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawErpCustomer {
    pub cid: Option<String>,
    pub bdate: Option<NaiveDate>,
    pub gen: Option<String>,
}

/// Raw ERP location row (`loc_a101`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawErpLocation {
    pub cid: Option<String>,
    pub cntry: Option<String>,
}

/// Raw ERP product category row (`px_cat_g1v2`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawErpCategory {
    pub id: Option<String>,
    pub cat: Option<String>,
    pub subcat: Option<String>,
    pub maintenance: Option<String>,
}

/// The full Bronze layer: one table per source extract, replaced wholesale
/// on every refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BronzeTables {
    pub customers: Vec<RawCustomer>,
    pub products: Vec<RawProduct>,
    pub sales: Vec<RawSale>,
    pub erp_customers: Vec<RawErpCustomer>,
    pub erp_locations: Vec<RawErpLocation>,
    pub erp_categories: Vec<RawErpCategory>,
}

impl BronzeTables {
    /// Total raw row count across all six tables.
    pub fn row_count(&self) -> usize {
        self.customers.len()
            + self.products.len()
            + self.sales.len()
            + self.erp_customers.len()
            + self.erp_locations.len()
            + self.erp_categories.len()
    }
}
