//! Cleaning rules for the CRM product entity, including reconstruction of
//! the effective date ranges for successive revisions of a reused key.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::bronze::RawProduct;
use crate::domain::{Product, ProductLine};

/// Split a raw product key into the category id prefix and the canonical
/// product key used for fact joins.
///
/// The first five characters form the category id with hyphens replaced by
/// underscores (matching the ERP category id format); the sixth character
/// is the separator; everything from the seventh character on is the key.
/// `AC-HE-HL-U509-R` splits into `AC_HE` and `HL-U509-R`.
pub fn split_product_key(raw_key: &str) -> (String, String) {
    let chars: Vec<char> = raw_key.chars().collect();
    let category_id: String = chars
        .iter()
        .take(5)
        .map(|c| if *c == '-' { '_' } else { *c })
        .collect();
    let key: String = if chars.len() > 6 {
        chars[6..].iter().collect()
    } else {
        String::new()
    };
    (category_id, key)
}

/// Map a raw product line code to its standardized value.
pub fn map_product_line(raw: Option<&str>) -> ProductLine {
    match raw.map(|s| s.trim().to_uppercase()).as_deref() {
        Some("M") => ProductLine::Mountain,
        Some("R") => ProductLine::Road,
        Some("S") => ProductLine::OtherSales,
        Some("T") => ProductLine::Touring,
        _ => ProductLine::Unknown,
    }
}

/// Clean the raw product extract:
/// - the raw key is split into category id and canonical key;
/// - null cost defaults to 0 (negative cost passes through untouched and is
///   only surfaced by the detection audit);
/// - line codes are standardized;
/// - the end date of each revision is derived as one day before the start
///   date of the next revision of the same key; the latest revision has no
///   end date (currently active). The raw end date is discarded.
///
/// Output is grouped by canonical key, each group ordered by start date.
pub fn clean_products(raw: &[RawProduct]) -> Vec<Product> {
    let mut by_key: BTreeMap<String, Vec<Product>> = BTreeMap::new();

    for row in raw {
        let raw_key = row.prd_key.as_deref().unwrap_or_default();
        let (category_id, key) = split_product_key(raw_key);

        let product = Product {
            id: row.prd_id,
            category_id,
            key: key.clone(),
            name: row.prd_nm.clone().unwrap_or_default(),
            cost: row.prd_cost.unwrap_or(0),
            line: map_product_line(row.prd_line.as_deref()),
            start_date: row.prd_start_dt,
            end_date: None,
        };

        by_key.entry(key).or_default().push(product);
    }

    let mut products = Vec::new();
    for (_, mut versions) in by_key {
        versions.sort_by_key(|p| p.start_date);
        for i in 0..versions.len() {
            versions[i].end_date = match versions.get(i + 1) {
                Some(next) => next.start_date.map(|d| d - Duration::days(1)),
                None => None,
            };
        }
        products.extend(versions);
    }
    products
}
