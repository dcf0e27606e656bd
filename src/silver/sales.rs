//! Cleaning rules for the CRM sales transaction lines: date decoding and
//! the measure-correction chain.

use chrono::NaiveDate;

use crate::bronze::RawSale;
use crate::domain::SalesLine;

/// The three transaction measures after correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measures {
    pub sales_amount: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

/// Decode an 8-digit YYYYMMDD integer into a calendar date. Zero, values
/// with the wrong digit count, values outside [19000101, 20500101] and
/// impossible calendar dates all coerce to None, never to an error.
pub fn parse_date_int(value: Option<i64>) -> Option<NaiveDate> {
    let v = value?;
    if v <= 0 || v.to_string().len() != 8 {
        return None;
    }
    if !(19000101..=20500101).contains(&v) {
        return None;
    }

    let year = (v / 10_000) as i32;
    let month = ((v / 100) % 100) as u32;
    let day = (v % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Correct the raw measure triple in a fixed evaluation order:
///
/// 1. sales_amount is recomputed as quantity * |price| when it is null,
///    non-positive, or inconsistent with that product;
/// 2. price is derived from the *corrected* sales amount divided by
///    quantity, but only when the raw price was null or non-positive
///    (null quantity, or zero, yields a null price).
///
/// Quantity is never corrected; a defective quantity passes through and is
/// left for the detection audit.
pub fn correct_measures(
    sales: Option<i64>,
    quantity: Option<i64>,
    price: Option<i64>,
) -> Measures {
    let expected = match (quantity, price) {
        (Some(q), Some(p)) => Some(q * p.abs()),
        _ => None,
    };

    let sales_amount = match (sales, expected) {
        (Some(s), Some(e)) if s > 0 && s == e => Some(s),
        // Cannot recompute without both factors; keep a plausible value.
        (Some(s), None) if s > 0 => Some(s),
        (_, e) => e,
    };

    let price = match price {
        Some(p) if p > 0 => Some(p),
        _ => match (sales_amount, quantity) {
            (Some(s), Some(q)) if q != 0 => Some(s / q),
            _ => None,
        },
    };

    Measures {
        sales_amount,
        quantity,
        price,
    }
}

/// Clean the raw sales extract. Dates are decoded from their integer
/// encoding and the measure triple is corrected; identifiers pass through
/// untouched.
pub fn clean_sales(raw: &[RawSale]) -> Vec<SalesLine> {
    raw.iter()
        .map(|row| {
            let measures = correct_measures(row.sls_sales, row.sls_quantity, row.sls_price);
            SalesLine {
                order_number: row.sls_ord_num.clone().unwrap_or_default(),
                product_key: row.sls_prd_key.clone().unwrap_or_default(),
                customer_id: row.sls_cust_id,
                order_date: parse_date_int(row.sls_order_dt),
                ship_date: parse_date_int(row.sls_ship_dt),
                due_date: parse_date_int(row.sls_due_dt),
                sales_amount: measures.sales_amount,
                quantity: measures.quantity,
                price: measures.price,
            }
        })
        .collect()
}
