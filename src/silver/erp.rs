//! Cleaning rules for the three ERP extracts: customer demographics,
//! locations, and the product category reference table.

use chrono::NaiveDate;

use crate::bronze::{RawErpCategory, RawErpCustomer, RawErpLocation};
use crate::domain::{ErpCategory, ErpCustomer, ErpLocation, Gender};

/// Normalize an ERP demographic customer id to the CRM key format by
/// stripping the literal `NAS` source-system prefix when present.
/// `NASAW00011000` becomes `AW00011000`.
pub fn normalize_demographic_key(cid: &str) -> String {
    cid.strip_prefix("NAS").unwrap_or(cid).to_string()
}

/// Normalize an ERP location customer id to the CRM key format by
/// stripping hyphens. `AW-00011000` becomes `AW00011000`.
pub fn normalize_location_key(cid: &str) -> String {
    cid.replace('-', "")
}

/// Map an ERP gender synonym to its standardized value. The ERP system
/// mixes single letters and spelled-out words in varying case.
pub fn map_erp_gender(raw: Option<&str>) -> Gender {
    match raw.map(|s| s.trim().to_uppercase()).as_deref() {
        Some("F") | Some("FEMALE") => Gender::Female,
        Some("M") | Some("MALE") => Gender::Male,
        _ => Gender::Unknown,
    }
}

/// Standardize an ERP country value. Known codes map to full names, blank
/// or null becomes "n/a", everything else passes through trimmed.
pub fn standardize_country(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    match trimmed {
        "DE" => "Germany".to_string(),
        "US" | "USA" => "United States".to_string(),
        "" => "n/a".to_string(),
        other => other.to_string(),
    }
}

/// Clean the ERP customer demographics extract. Birthdates later than the
/// injected processing date are nulled; dates older than 1924 are left
/// untouched here and only flagged by the detection audit.
pub fn clean_erp_customers(raw: &[RawErpCustomer], as_of_date: NaiveDate) -> Vec<ErpCustomer> {
    raw.iter()
        .map(|row| ErpCustomer {
            customer_key: normalize_demographic_key(row.cid.as_deref().unwrap_or_default()),
            birthdate: row.bdate.filter(|d| *d <= as_of_date),
            gender: map_erp_gender(row.gen.as_deref()),
        })
        .collect()
}

/// Clean the ERP location extract.
pub fn clean_erp_locations(raw: &[RawErpLocation]) -> Vec<ErpLocation> {
    raw.iter()
        .map(|row| ErpLocation {
            customer_key: normalize_location_key(row.cid.as_deref().unwrap_or_default()),
            country: standardize_country(row.cntry.as_deref()),
        })
        .collect()
}

/// The ERP category table is reference data assumed pre-clean; rows pass
/// through as-is (whitespace findings are detection-only).
pub fn clean_erp_categories(raw: &[RawErpCategory]) -> Vec<ErpCategory> {
    raw.iter()
        .map(|row| ErpCategory {
            id: row.id.clone().unwrap_or_default(),
            category: row.cat.clone().unwrap_or_default(),
            subcategory: row.subcat.clone().unwrap_or_default(),
            maintenance: row.maintenance.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_nas_prefix_is_stripped() {
        assert_eq!(normalize_demographic_key("NASAW00011000"), "AW00011000");
        assert_eq!(normalize_demographic_key("AW00011000"), "AW00011000");
    }

    #[test]
    fn test_location_hyphens_are_stripped() {
        assert_eq!(normalize_location_key("AW-00011000"), "AW00011000");
        assert_eq!(normalize_location_key("AW00011000"), "AW00011000");
    }

    #[test]
    fn test_future_birthdate_is_nulled() {
        let raw = RawErpCustomer {
            cid: Some("NASAW00011000".to_string()),
            bdate: NaiveDate::from_ymd_opt(2030, 6, 1),
            gen: Some("F".to_string()),
        };
        let cleaned = clean_erp_customers(&[raw], as_of());
        assert_eq!(cleaned[0].birthdate, None);
    }

    #[test]
    fn test_old_birthdate_passes_through() {
        // Pre-1924 birthdates are flagged by the audit, never corrected.
        let raw = RawErpCustomer {
            cid: Some("AW00011000".to_string()),
            bdate: NaiveDate::from_ymd_opt(1916, 2, 10),
            gen: None,
        };
        let cleaned = clean_erp_customers(&[raw], as_of());
        assert_eq!(
            cleaned[0].birthdate,
            NaiveDate::from_ymd_opt(1916, 2, 10)
        );
    }

    #[test]
    fn test_erp_gender_synonyms() {
        assert_eq!(map_erp_gender(Some("F")), Gender::Female);
        assert_eq!(map_erp_gender(Some(" female ")), Gender::Female);
        assert_eq!(map_erp_gender(Some("Male")), Gender::Male);
        assert_eq!(map_erp_gender(Some("m")), Gender::Male);
        assert_eq!(map_erp_gender(Some("")), Gender::Unknown);
        assert_eq!(map_erp_gender(None), Gender::Unknown);
    }

    #[test]
    fn test_country_standardization() {
        assert_eq!(standardize_country(Some("DE")), "Germany");
        assert_eq!(standardize_country(Some(" US ")), "United States");
        assert_eq!(standardize_country(Some("USA")), "United States");
        assert_eq!(standardize_country(Some("Australia")), "Australia");
        assert_eq!(standardize_country(Some("  France ")), "France");
        assert_eq!(standardize_country(Some("")), "n/a");
        assert_eq!(standardize_country(None), "n/a");
    }

    #[test]
    fn test_categories_pass_through_untrimmed() {
        let raw = RawErpCategory {
            id: Some("AC_HE".to_string()),
            cat: Some(" Accessories".to_string()),
            subcat: Some("Helmets".to_string()),
            maintenance: Some("Yes".to_string()),
        };
        let cleaned = clean_erp_categories(&[raw]);
        assert_eq!(cleaned[0].category, " Accessories");
        assert_eq!(cleaned[0].subcategory, "Helmets");
    }
}
