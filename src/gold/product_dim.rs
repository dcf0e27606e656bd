//! Product dimension build: active product versions enriched with the ERP
//! category reference data.

use std::collections::HashMap;

use crate::silver::SilverSnapshot;

use super::ProductDimRow;

/// Build the product dimension: left-outer-join products to the ERP
/// category table by category id, keep only currently-active versions
/// (null end date), and assign surrogate keys 1..N ordered by
/// (start date, product number).
pub fn build_product_dim(silver: &SilverSnapshot) -> Vec<ProductDimRow> {
    let categories: HashMap<&str, &crate::domain::ErpCategory> = silver
        .erp_categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let mut active: Vec<_> = silver
        .products
        .iter()
        .filter(|p| p.end_date.is_none())
        .collect();
    active.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.key.cmp(&b.key))
    });

    active
        .into_iter()
        .enumerate()
        .map(|(i, product)| {
            let category = categories.get(product.category_id.as_str());

            ProductDimRow {
                product_key: i as i64 + 1,
                product_id: product.id,
                product_number: product.key.clone(),
                product_name: product.name.clone(),
                category_id: product.category_id.clone(),
                category: category.map(|c| c.category.clone()).unwrap_or_default(),
                subcategory: category.map(|c| c.subcategory.clone()).unwrap_or_default(),
                maintenance: category.map(|c| c.maintenance.clone()).unwrap_or_default(),
                cost: product.cost,
                product_line: product.line.to_string(),
                start_date: product.start_date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErpCategory, Product, ProductLine};
    use chrono::NaiveDate;

    fn product(key: &str, category_id: &str, start: &str, end: Option<&str>) -> Product {
        Product {
            id: Some(210),
            category_id: category_id.to_string(),
            key: key.to_string(),
            name: "HL Road Frame".to_string(),
            cost: 1059,
            line: ProductLine::Road,
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").ok(),
            end_date: end.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        }
    }

    fn snapshot() -> SilverSnapshot {
        SilverSnapshot {
            products: vec![
                product("FR-R92B-58", "CO_RF", "2012-07-01", Some("2013-06-30")),
                product("FR-R92B-58", "CO_RF", "2013-07-01", None),
                product("HL-U509-R", "AC_HE", "2011-07-01", None),
            ],
            erp_categories: vec![ErpCategory {
                id: "AC_HE".to_string(),
                category: "Accessories".to_string(),
                subcategory: "Helmets".to_string(),
                maintenance: "No".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_historical_versions_are_excluded() {
        let dim = build_product_dim(&snapshot());
        assert_eq!(dim.len(), 2);
        assert!(dim.iter().all(|r| r.product_number != "FR-R92B-58"
            || r.start_date == NaiveDate::from_ymd_opt(2013, 7, 1)));
    }

    #[test]
    fn test_surrogate_order_by_start_date_then_key() {
        let dim = build_product_dim(&snapshot());
        assert_eq!(dim[0].product_key, 1);
        assert_eq!(dim[0].product_number, "HL-U509-R");
        assert_eq!(dim[1].product_key, 2);
        assert_eq!(dim[1].product_number, "FR-R92B-58");
    }

    #[test]
    fn test_category_left_join() {
        let dim = build_product_dim(&snapshot());

        let helmet = dim.iter().find(|r| r.product_number == "HL-U509-R").unwrap();
        assert_eq!(helmet.category, "Accessories");
        assert_eq!(helmet.subcategory, "Helmets");

        // CO_RF has no reference row; attributes default to empty.
        let frame = dim.iter().find(|r| r.product_number == "FR-R92B-58").unwrap();
        assert_eq!(frame.category, "");
        assert_eq!(frame.maintenance, "");
    }
}
