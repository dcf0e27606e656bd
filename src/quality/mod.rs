//! Post-build data-quality validation over the Gold views.
//!
//! The validator reports invariant violations and never repairs them. Both
//! result sets are expected empty; a non-empty result is the release gate
//! failing, and a Gold layer exhibiting duplicate surrogate keys must not
//! be consumed downstream.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::gold::GoldViews;
use crate::silver::SilverSnapshot;

/// A surrogate key that identifies more than one dimension row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateKey {
    pub dimension: &'static str,
    pub surrogate_key: i64,
    pub count: usize,
}

/// Which dimension reference a fact row failed to resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MissingReference {
    /// Product business key present in the source line but absent from the
    /// product dimension
    Product { product_number: String },
    /// Customer business id present in the source line but absent from the
    /// customer dimension
    Customer { customer_id: i64 },
}

/// A fact row referencing a dimension entry that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanedFact {
    pub order_number: String,
    pub missing: MissingReference,
}

/// Full validation result for one Gold build. Empty on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub duplicate_keys: Vec<DuplicateKey>,
    pub orphaned_facts: Vec<OrphanedFact>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_keys.is_empty() && self.orphaned_facts.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.duplicate_keys.len() + self.orphaned_facts.len()
    }
}

fn duplicate_keys<I: Iterator<Item = i64>>(dimension: &'static str, keys: I) -> Vec<DuplicateKey> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut duplicates: Vec<DuplicateKey> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(surrogate_key, count)| DuplicateKey {
            dimension,
            surrogate_key,
            count,
        })
        .collect();
    duplicates.sort_by_key(|d| d.surrogate_key);
    duplicates
}

/// Run both invariant checks against a freshly built Gold layer.
///
/// Orphan detection walks the fact rows side by side with the Silver sales
/// lines they were built from (the fact build is 1:1 and order-preserving):
/// a null foreign key whose source business key was present means the
/// lookup that should have matched did not.
pub fn validate(silver: &SilverSnapshot, gold: &GoldViews) -> ValidationReport {
    let mut report = ValidationReport {
        duplicate_keys: Vec::new(),
        orphaned_facts: Vec::new(),
    };

    report.duplicate_keys.extend(duplicate_keys(
        "dim_customers",
        gold.customers.iter().map(|c| c.customer_key),
    ));
    report.duplicate_keys.extend(duplicate_keys(
        "dim_products",
        gold.products.iter().map(|p| p.product_key),
    ));

    let product_keys: HashSet<i64> = gold.products.iter().map(|p| p.product_key).collect();
    let customer_keys: HashSet<i64> = gold.customers.iter().map(|c| c.customer_key).collect();

    for (line, fact) in silver.sales.iter().zip(&gold.sales) {
        match fact.product_key {
            Some(key) if !product_keys.contains(&key) => {
                report.orphaned_facts.push(OrphanedFact {
                    order_number: fact.order_number.clone(),
                    missing: MissingReference::Product {
                        product_number: line.product_key.clone(),
                    },
                });
            }
            None if !line.product_key.is_empty() => {
                report.orphaned_facts.push(OrphanedFact {
                    order_number: fact.order_number.clone(),
                    missing: MissingReference::Product {
                        product_number: line.product_key.clone(),
                    },
                });
            }
            _ => {}
        }

        match (fact.customer_key, line.customer_id) {
            (Some(key), _) if !customer_keys.contains(&key) => {
                report.orphaned_facts.push(OrphanedFact {
                    order_number: fact.order_number.clone(),
                    missing: MissingReference::Customer {
                        customer_id: line.customer_id.unwrap_or_default(),
                    },
                });
            }
            (None, Some(customer_id)) => {
                report.orphaned_facts.push(OrphanedFact {
                    order_number: fact.order_number.clone(),
                    missing: MissingReference::Customer { customer_id },
                });
            }
            _ => {}
        }
    }

    if !report.is_clean() {
        warn!(
            duplicate_keys = report.duplicate_keys.len(),
            orphaned_facts = report.orphaned_facts.len(),
            "Gold validation found violations"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesLine;
    use crate::gold::build_views;
    use crate::silver::SilverSnapshot;

    fn sales_line(order: &str, product_key: &str, customer_id: Option<i64>) -> SalesLine {
        SalesLine {
            order_number: order.to_string(),
            product_key: product_key.to_string(),
            customer_id,
            order_date: None,
            ship_date: None,
            due_date: None,
            sales_amount: Some(10),
            quantity: Some(1),
            price: Some(10),
        }
    }

    #[test]
    fn test_clean_build_produces_empty_report() {
        let silver = SilverSnapshot::default();
        let gold = build_views(&silver);
        let report = validate(&silver, &gold);
        assert!(report.is_clean());
        assert_eq!(report.violation_count(), 0);
    }

    #[test]
    fn test_orphaned_product_reference_is_reported() {
        let silver = SilverSnapshot {
            sales: vec![sales_line("SO1", "NO-SUCH-KEY", None)],
            ..Default::default()
        };
        let gold = build_views(&silver);

        let report = validate(&silver, &gold);
        assert_eq!(report.orphaned_facts.len(), 1);
        assert_eq!(
            report.orphaned_facts[0].missing,
            MissingReference::Product {
                product_number: "NO-SUCH-KEY".to_string()
            }
        );
    }

    #[test]
    fn test_orphaned_customer_reference_is_reported() {
        let silver = SilverSnapshot {
            sales: vec![sales_line("SO2", "", Some(42))],
            ..Default::default()
        };
        let gold = build_views(&silver);

        let report = validate(&silver, &gold);
        assert_eq!(report.orphaned_facts.len(), 1);
        assert_eq!(
            report.orphaned_facts[0].missing,
            MissingReference::Customer { customer_id: 42 }
        );
    }

    #[test]
    fn test_missing_source_key_is_not_an_orphan() {
        // A line that never carried a product key or customer id resolves
        // to null foreign keys by design and must not be reported.
        let silver = SilverSnapshot {
            sales: vec![sales_line("SO3", "", None)],
            ..Default::default()
        };
        let gold = build_views(&silver);

        assert!(validate(&silver, &gold).is_clean());
    }

    #[test]
    fn test_duplicate_surrogate_keys_are_reported() {
        let silver = SilverSnapshot::default();
        let mut gold = build_views(&silver);

        // Hand-corrupt the build with two dimension rows sharing a key.
        gold.customers = vec![
            crate::gold::CustomerDimRow {
                customer_key: 1,
                customer_id: 11000,
                customer_number: "AW00011000".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                country: "n/a".to_string(),
                marital_status: "n/a".to_string(),
                gender: "n/a".to_string(),
                birthdate: None,
                create_date: None,
            },
            crate::gold::CustomerDimRow {
                customer_key: 1,
                customer_id: 11001,
                customer_number: "AW00011001".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                country: "n/a".to_string(),
                marital_status: "n/a".to_string(),
                gender: "n/a".to_string(),
                birthdate: None,
                create_date: None,
            },
        ];

        let report = validate(&silver, &gold);
        assert_eq!(report.duplicate_keys.len(), 1);
        assert_eq!(report.duplicate_keys[0].dimension, "dim_customers");
        assert_eq!(report.duplicate_keys[0].surrogate_key, 1);
        assert_eq!(report.duplicate_keys[0].count, 2);
        assert!(!report.is_clean());
    }
}
