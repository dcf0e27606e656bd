//! Sales fact build: every transaction line with its dimension foreign
//! keys resolved via business-key lookup.

use std::collections::HashMap;

use crate::silver::SilverSnapshot;

use super::{CustomerDimRow, ProductDimRow, SalesFactRow};

/// Build the sales fact. Product keys and customer ids resolve to their
/// dimension surrogate keys via left-outer lookup; lines with no matching
/// dimension row keep a null foreign key and are never dropped; the
/// quality validator reports them as orphans afterwards.
pub fn build_sales_fact(
    silver: &SilverSnapshot,
    customers: &[CustomerDimRow],
    products: &[ProductDimRow],
) -> Vec<SalesFactRow> {
    let product_keys: HashMap<&str, i64> = products
        .iter()
        .map(|p| (p.product_number.as_str(), p.product_key))
        .collect();
    let customer_keys: HashMap<i64, i64> = customers
        .iter()
        .map(|c| (c.customer_id, c.customer_key))
        .collect();

    silver
        .sales
        .iter()
        .map(|line| SalesFactRow {
            order_number: line.order_number.clone(),
            product_key: product_keys.get(line.product_key.as_str()).copied(),
            customer_key: line
                .customer_id
                .and_then(|id| customer_keys.get(&id).copied()),
            order_date: line.order_date,
            shipping_date: line.ship_date,
            due_date: line.due_date,
            sales_amount: line.sales_amount,
            quantity: line.quantity,
            price: line.price,
        })
        .collect()
}
