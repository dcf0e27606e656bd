//! Cleaning rules for the CRM customer entity.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::bronze::RawCustomer;
use crate::domain::{Customer, Gender, MaritalStatus};

/// Map a raw marital status code to its standardized value. Codes are
/// matched case-insensitively after trimming; anything unrecognized maps
/// to "n/a".
pub fn map_marital_status(raw: Option<&str>) -> MaritalStatus {
    match raw.map(|s| s.trim().to_uppercase()).as_deref() {
        Some("S") => MaritalStatus::Single,
        Some("M") => MaritalStatus::Married,
        _ => MaritalStatus::Unknown,
    }
}

/// Map a raw CRM gender code to its standardized value.
pub fn map_gender(raw: Option<&str>) -> Gender {
    match raw.map(|s| s.trim().to_uppercase()).as_deref() {
        Some("F") => Gender::Female,
        Some("M") => Gender::Male,
        _ => Gender::Unknown,
    }
}

/// Clean the raw customer extract:
/// - rows with a null business id are discarded (the only dropping rule);
/// - duplicates are resolved by keeping the row with the maximum creation
///   date wholesale, no field-level merging; on equal creation dates the
///   last occurrence in input order wins;
/// - name fields are trimmed, status/gender codes standardized.
///
/// Output is ordered by ascending business id.
pub fn clean_customers(raw: &[RawCustomer]) -> Vec<Customer> {
    // (create_date, input index) per id; None dates lose to any dated row.
    let mut latest: BTreeMap<i64, (Option<NaiveDate>, &RawCustomer)> = BTreeMap::new();

    for row in raw {
        let Some(id) = row.cst_id else { continue };
        match latest.get(&id) {
            Some((kept_date, _)) if row.cst_create_date < *kept_date => {}
            _ => {
                latest.insert(id, (row.cst_create_date, row));
            }
        }
    }

    latest
        .into_iter()
        .map(|(id, (_, row))| Customer {
            id,
            key: row.cst_key.clone().unwrap_or_default(),
            first_name: row
                .cst_firstname
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            last_name: row
                .cst_lastname
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            marital_status: map_marital_status(row.cst_marital_status.as_deref()),
            gender: map_gender(row.cst_gndr.as_deref()),
            create_date: row.cst_create_date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(id: Option<i64>, create_date: Option<&str>) -> RawCustomer {
        RawCustomer {
            cst_id: id,
            cst_key: Some(format!("AW{:08}", id.unwrap_or(0))),
            cst_create_date: create_date
                .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_null_business_id_rows_are_discarded() {
        let rows = vec![raw(None, Some("2021-01-01")), raw(Some(5), Some("2021-01-01"))];
        let cleaned = clean_customers(&rows);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].id, 5);
    }

    #[test]
    fn test_duplicate_keeps_latest_row_wholesale() {
        // The 2021 row says female/single; the 2022 row says male with no
        // status. The 2022 row must win wholesale, not merge per field.
        let mut early = raw(Some(101), Some("2021-01-01"));
        early.cst_gndr = Some(" f ".to_string());
        early.cst_marital_status = Some("s".to_string());

        let mut late = raw(Some(101), Some("2022-01-01"));
        late.cst_gndr = Some("M".to_string());

        let cleaned = clean_customers(&[early, late]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].gender, Gender::Male);
        assert_eq!(cleaned[0].marital_status, MaritalStatus::Unknown);
        assert_eq!(
            cleaned[0].create_date,
            NaiveDate::from_ymd_opt(2022, 1, 1)
        );
    }

    #[test]
    fn test_duplicate_tie_keeps_last_in_input_order() {
        let mut first = raw(Some(7), Some("2022-06-01"));
        first.cst_firstname = Some("First".to_string());
        let mut second = raw(Some(7), Some("2022-06-01"));
        second.cst_firstname = Some("Second".to_string());

        let cleaned = clean_customers(&[first, second]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].first_name, "Second");
    }

    #[test]
    fn test_dated_duplicate_beats_undated() {
        let undated = raw(Some(3), None);
        let dated = raw(Some(3), Some("2020-05-05"));
        let cleaned = clean_customers(&[dated.clone(), undated]);
        assert_eq!(cleaned[0].create_date, NaiveDate::from_ymd_opt(2020, 5, 5));
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut row = raw(Some(1), Some("2021-01-01"));
        row.cst_firstname = Some("  Jon ".to_string());
        row.cst_lastname = Some(" Snow  ".to_string());

        let cleaned = clean_customers(&[row]);
        assert_eq!(cleaned[0].first_name, "Jon");
        assert_eq!(cleaned[0].last_name, "Snow");
    }

    #[test]
    fn test_marital_status_mapping() {
        assert_eq!(map_marital_status(Some(" s ")), MaritalStatus::Single);
        assert_eq!(map_marital_status(Some("M")), MaritalStatus::Married);
        assert_eq!(map_marital_status(Some("divorced")), MaritalStatus::Unknown);
        assert_eq!(map_marital_status(None), MaritalStatus::Unknown);
    }

    #[test]
    fn test_gender_mapping() {
        assert_eq!(map_gender(Some(" f ")), Gender::Female);
        assert_eq!(map_gender(Some("m")), Gender::Male);
        assert_eq!(map_gender(Some("x")), Gender::Unknown);
        assert_eq!(map_gender(None), Gender::Unknown);
    }

    #[test]
    fn test_output_ordered_by_business_id() {
        let rows = vec![
            raw(Some(30), Some("2021-01-01")),
            raw(Some(10), Some("2021-01-01")),
            raw(Some(20), Some("2021-01-01")),
        ];
        let ids: Vec<i64> = clean_customers(&rows).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
