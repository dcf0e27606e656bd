use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Standardized marital status values for the customer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Unknown,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Unknown => "n/a",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized gender values shared by the CRM and ERP customer entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "n/a",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized product line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductLine {
    Mountain,
    Road,
    OtherSales,
    Touring,
    Unknown,
}

impl ProductLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLine::Mountain => "Mountain",
            ProductLine::Road => "Road",
            ProductLine::OtherSales => "Other Sales",
            ProductLine::Touring => "Touring",
            ProductLine::Unknown => "n/a",
        }
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaned CRM customer. One row per business id; duplicates in the raw
/// extract are resolved by keeping the most recently created version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub marital_status: MaritalStatus,
    pub gender: Gender,
    pub create_date: Option<NaiveDate>,
}

/// Cleaned CRM product version. The raw product key is reused across
/// revisions; `end_date` is reconstructed from the start date of the next
/// revision of the same key (None = currently active).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub category_id: String,
    pub key: String,
    pub name: String,
    pub cost: i64,
    pub line: ProductLine,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Cleaned sales transaction line. After correction the measures satisfy
/// sales_amount == quantity * price whenever all three are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLine {
    pub order_number: String,
    pub product_key: String,
    pub customer_id: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sales_amount: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

/// Cleaned ERP customer demographics, keyed by the normalized customer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpCustomer {
    pub customer_key: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: Gender,
}

/// Cleaned ERP location record, keyed by the normalized customer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpLocation {
    pub customer_key: String,
    pub country: String,
}

/// ERP product category reference data (pass-through, assumed pre-clean).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpCategory {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub maintenance: String,
}

/// Bookkeeping record for one full warehouse refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRun {
    pub id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub bronze_rows: usize,
    pub silver_rows: usize,
    pub fact_rows: usize,
    pub violations: usize,
}

impl RefreshRun {
    pub fn started_now() -> Self {
        Self {
            id: None,
            started_at: Utc::now(),
            finished_at: None,
            bronze_rows: 0,
            silver_rows: 0,
            fact_rows: 0,
            violations: 0,
        }
    }
}
