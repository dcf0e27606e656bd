//! Customer dimension build: CRM customers enriched with ERP demographics
//! and locations, keyed by a dense surrogate.

use std::collections::HashMap;

use crate::domain::Gender;
use crate::silver::SilverSnapshot;

use super::CustomerDimRow;

/// Resolve the customer's gender, preferring the CRM value. The CRM system
/// is the master for customer data; the ERP demographic value is only a
/// fallback when the CRM did not record one.
pub fn resolve_gender(crm: Gender, erp: Option<Gender>) -> Gender {
    match crm {
        Gender::Unknown => erp.unwrap_or(Gender::Unknown),
        known => known,
    }
}

/// Build the customer dimension: left-outer-join customers to the two ERP
/// tables by business key and assign surrogate keys 1..N in ascending
/// business id order (gap-free).
pub fn build_customer_dim(silver: &SilverSnapshot) -> Vec<CustomerDimRow> {
    let demographics: HashMap<&str, &crate::domain::ErpCustomer> = silver
        .erp_customers
        .iter()
        .map(|c| (c.customer_key.as_str(), c))
        .collect();
    let locations: HashMap<&str, &crate::domain::ErpLocation> = silver
        .erp_locations
        .iter()
        .map(|l| (l.customer_key.as_str(), l))
        .collect();

    // Silver customers are already ordered by business id; sort again so
    // surrogate assignment never depends on upstream ordering.
    let mut customers: Vec<_> = silver.customers.iter().collect();
    customers.sort_by_key(|c| c.id);

    customers
        .into_iter()
        .enumerate()
        .map(|(i, customer)| {
            let demographic = demographics.get(customer.key.as_str());
            let location = locations.get(customer.key.as_str());

            CustomerDimRow {
                customer_key: i as i64 + 1,
                customer_id: customer.id,
                customer_number: customer.key.clone(),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                country: location
                    .map(|l| l.country.clone())
                    .unwrap_or_else(|| "n/a".to_string()),
                marital_status: customer.marital_status.to_string(),
                gender: resolve_gender(customer.gender, demographic.map(|d| d.gender))
                    .to_string(),
                birthdate: demographic.and_then(|d| d.birthdate),
                create_date: customer.create_date,
            }
        })
        .collect()
}
