//! Detection-only data-quality audit over the Bronze tables.
//!
//! These checks mirror the asymmetry of the cleaning rules on purpose:
//! some defects the cleaner corrects (and the audit merely previews), some
//! it deliberately leaves in place (negative product cost, pre-1924
//! birthdates, unfixed quantities). The audit reports, it never repairs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bronze::BronzeTables;
use crate::silver::sales::parse_date_int;

/// Oldest birthdate accepted without comment.
pub const BIRTHDATE_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(1924, 1, 1) {
    Some(d) => d,
    None => unreachable!(),
};

/// Kinds of defects the audit can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    /// Null or duplicate business identifier
    BrokenIdentifier,
    /// Value with leading/trailing whitespace
    UntrimmedValue,
    /// Numeric value outside its valid domain
    OutOfRange,
    /// Undecodable or impossible date encoding
    InvalidDate,
    /// Dates in an impossible order (e.g. order after ship)
    TemporalInconsistency,
    /// Measure triple violating sales = quantity * price
    InconsistentMeasures,
}

/// One detection-only finding. Reported to the operator, never applied to
/// the data.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Source table the finding was raised against
    pub entity: &'static str,
    /// Field or attribute that triggered the finding
    pub field: &'static str,
    /// Human-readable description
    pub description: String,
}

impl Finding {
    fn new(
        kind: FindingKind,
        entity: &'static str,
        field: &'static str,
        description: String,
    ) -> Self {
        Self {
            kind,
            entity,
            field,
            description,
        }
    }
}

fn is_untrimmed(value: &str) -> bool {
    value != value.trim()
}

/// Run every detection query against the raw tables.
pub fn audit_bronze(bronze: &BronzeTables, as_of_date: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();
    audit_customers(bronze, &mut findings);
    audit_products(bronze, &mut findings);
    audit_sales(bronze, &mut findings);
    audit_erp(bronze, as_of_date, &mut findings);
    findings
}

fn audit_customers(bronze: &BronzeTables, findings: &mut Vec<Finding>) {
    let mut id_counts: HashMap<i64, usize> = HashMap::new();
    for row in &bronze.customers {
        match row.cst_id {
            Some(id) => *id_counts.entry(id).or_default() += 1,
            None => findings.push(Finding::new(
                FindingKind::BrokenIdentifier,
                "crm_customers",
                "cst_id",
                "customer row with null business id (dropped by cleaning)".to_string(),
            )),
        }

        for (field, value) in [
            ("cst_firstname", &row.cst_firstname),
            ("cst_lastname", &row.cst_lastname),
        ] {
            if value.as_deref().is_some_and(is_untrimmed) {
                findings.push(Finding::new(
                    FindingKind::UntrimmedValue,
                    "crm_customers",
                    field,
                    format!("untrimmed value {:?}", value.as_deref().unwrap_or("")),
                ));
            }
        }
    }

    for (id, count) in id_counts {
        if count > 1 {
            findings.push(Finding::new(
                FindingKind::BrokenIdentifier,
                "crm_customers",
                "cst_id",
                format!("business id {} appears {} times", id, count),
            ));
        }
    }
}

fn audit_products(bronze: &BronzeTables, findings: &mut Vec<Finding>) {
    for row in &bronze.products {
        match row.prd_cost {
            None => findings.push(Finding::new(
                FindingKind::OutOfRange,
                "crm_products",
                "prd_cost",
                format!("null cost on product {:?}", row.prd_key.as_deref()),
            )),
            Some(cost) if cost < 0 => findings.push(Finding::new(
                FindingKind::OutOfRange,
                "crm_products",
                "prd_cost",
                format!(
                    "negative cost {} on product {:?} (passes through uncorrected)",
                    cost,
                    row.prd_key.as_deref()
                ),
            )),
            _ => {}
        }

        if row.prd_nm.as_deref().is_some_and(is_untrimmed) {
            findings.push(Finding::new(
                FindingKind::UntrimmedValue,
                "crm_products",
                "prd_nm",
                format!("untrimmed product name {:?}", row.prd_nm.as_deref().unwrap_or("")),
            ));
        }

        if let (Some(start), Some(end)) = (row.prd_start_dt, row.prd_end_dt) {
            if end < start {
                findings.push(Finding::new(
                    FindingKind::TemporalInconsistency,
                    "crm_products",
                    "prd_end_dt",
                    format!(
                        "raw end date {} before start date {} on product {:?}",
                        end,
                        start,
                        row.prd_key.as_deref()
                    ),
                ));
            }
        }
    }
}

fn audit_sales(bronze: &BronzeTables, findings: &mut Vec<Finding>) {
    for row in &bronze.sales {
        for (field, value) in [
            ("sls_order_dt", row.sls_order_dt),
            ("sls_ship_dt", row.sls_ship_dt),
            ("sls_due_dt", row.sls_due_dt),
        ] {
            if let Some(v) = value {
                if parse_date_int(Some(v)).is_none() {
                    findings.push(Finding::new(
                        FindingKind::InvalidDate,
                        "crm_sales",
                        field,
                        format!(
                            "undecodable date {} on order {:?}",
                            v,
                            row.sls_ord_num.as_deref()
                        ),
                    ));
                }
            }
        }

        let order = parse_date_int(row.sls_order_dt);
        let ship = parse_date_int(row.sls_ship_dt);
        let due = parse_date_int(row.sls_due_dt);
        if let (Some(order), Some(ship)) = (order, ship) {
            if order > ship {
                findings.push(Finding::new(
                    FindingKind::TemporalInconsistency,
                    "crm_sales",
                    "sls_order_dt",
                    format!("order {:?} ordered after shipping", row.sls_ord_num.as_deref()),
                ));
            }
        }
        if let (Some(order), Some(due)) = (order, due) {
            if order > due {
                findings.push(Finding::new(
                    FindingKind::TemporalInconsistency,
                    "crm_sales",
                    "sls_order_dt",
                    format!("order {:?} ordered after due date", row.sls_ord_num.as_deref()),
                ));
            }
        }

        let consistent = match (row.sls_sales, row.sls_quantity, row.sls_price) {
            (Some(s), Some(q), Some(p)) => s > 0 && q > 0 && p > 0 && s == q * p,
            _ => false,
        };
        if !consistent {
            findings.push(Finding::new(
                FindingKind::InconsistentMeasures,
                "crm_sales",
                "sls_sales",
                format!(
                    "order {:?}: sales {:?}, quantity {:?}, price {:?} (corrected by cleaning)",
                    row.sls_ord_num.as_deref(),
                    row.sls_sales,
                    row.sls_quantity,
                    row.sls_price
                ),
            ));
        }
    }
}

fn audit_erp(bronze: &BronzeTables, as_of_date: NaiveDate, findings: &mut Vec<Finding>) {
    for row in &bronze.erp_customers {
        if let Some(bdate) = row.bdate {
            if bdate < BIRTHDATE_FLOOR {
                findings.push(Finding::new(
                    FindingKind::OutOfRange,
                    "erp_customers",
                    "bdate",
                    format!(
                        "birthdate {} before {} on {:?} (passes through uncorrected)",
                        bdate,
                        BIRTHDATE_FLOOR,
                        row.cid.as_deref()
                    ),
                ));
            } else if bdate > as_of_date {
                findings.push(Finding::new(
                    FindingKind::OutOfRange,
                    "erp_customers",
                    "bdate",
                    format!(
                        "future birthdate {} on {:?} (nulled by cleaning)",
                        bdate,
                        row.cid.as_deref()
                    ),
                ));
            }
        }
    }

    for row in &bronze.erp_categories {
        for (field, value) in [
            ("cat", &row.cat),
            ("subcat", &row.subcat),
            ("maintenance", &row.maintenance),
        ] {
            if value.as_deref().is_some_and(is_untrimmed) {
                findings.push(Finding::new(
                    FindingKind::UntrimmedValue,
                    "erp_categories",
                    field,
                    format!("untrimmed value {:?}", value.as_deref().unwrap_or("")),
                ));
            }
        }
    }
}
