//! Gold layer: business-facing star schema computed on read.
//!
//! The three views are pure functions over the current Silver snapshot;
//! nothing here is materialized, so "freshness" is simply "as of the last
//! Silver rebuild".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::silver::SilverSnapshot;

pub mod customer_dim;
pub mod product_dim;
pub mod sales_fact;

/// One row of the customer dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDimRow {
    /// Surrogate key, dense 1..N by ascending business id
    pub customer_key: i64,
    pub customer_id: i64,
    pub customer_number: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub marital_status: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
    pub create_date: Option<NaiveDate>,
}

/// One row of the product dimension (currently-active products only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDimRow {
    /// Surrogate key, dense 1..N by (start date, product number)
    pub product_key: i64,
    pub product_id: Option<i64>,
    pub product_number: String,
    pub product_name: String,
    pub category_id: String,
    pub category: String,
    pub subcategory: String,
    pub maintenance: String,
    pub cost: i64,
    pub product_line: String,
    pub start_date: Option<NaiveDate>,
}

/// One row of the sales fact. Unresolved dimension lookups keep a null
/// foreign key instead of dropping the row, preserving transaction
/// completeness for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFactRow {
    pub order_number: String,
    pub product_key: Option<i64>,
    pub customer_key: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub shipping_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sales_amount: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

/// The three Gold relations for one Silver snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoldViews {
    pub customers: Vec<CustomerDimRow>,
    pub products: Vec<ProductDimRow>,
    pub sales: Vec<SalesFactRow>,
}

/// Build all three Gold views. Dimensions are built first because the fact
/// resolves its foreign keys against them.
pub fn build_views(silver: &SilverSnapshot) -> GoldViews {
    let customers = customer_dim::build_customer_dim(silver);
    let products = product_dim::build_product_dim(silver);
    let sales = sales_fact::build_sales_fact(silver, &customers, &products);

    info!(
        customer_rows = customers.len(),
        product_rows = products.len(),
        fact_rows = sales.len(),
        "Gold views built"
    );

    GoldViews {
        customers,
        products,
        sales,
    }
}
