//! Merges external customer data into internal records.
//!
//! Pure functions: no I/O, deterministic given their inputs.

use super::customers_model::{Customer, CustomerType, ExternalCustomer};

/// Builds an empty record owned by the external customer's id.
pub fn build_new_customer(external: &ExternalCustomer) -> Customer {
    let mut customer = Customer::default();
    customer.adopt_external_id(&external.external_id);
    customer
}

/// Minimal merge for demoted duplicates: only the name is copied.
pub fn merge_as_duplicate(external: &ExternalCustomer, candidate: Option<Customer>) -> Customer {
    let mut customer = candidate.unwrap_or_else(|| build_new_customer(external));
    customer.name = external.name.clone();
    customer
}

/// Full merge into the primary match.
///
/// Shopping lists are appended to the existing ones. Companies get their
/// company number and type; persons get their type and, when it differs,
/// the bonus points balance.
pub fn merge_full(external: &ExternalCustomer, candidate: Option<Customer>) -> Customer {
    let mut customer = candidate.unwrap_or_else(|| build_new_customer(external));
    customer.name = external.name.clone();
    customer.preferred_store = external.preferred_store.clone();
    customer.address = external.address.clone();
    customer.add_shopping_lists(&external.shopping_lists);

    match &external.company_number {
        Some(company_number) => {
            customer.company_number = Some(company_number.clone());
            customer.customer_type = Some(CustomerType::Company);
        }
        None => {
            if should_update_bonus_points(external, &customer) {
                customer.bonus_points_balance = external.bonus_points_balance;
            }
            customer.customer_type = Some(CustomerType::Person);
        }
    }
    customer
}

fn should_update_bonus_points(external: &ExternalCustomer, customer: &Customer) -> bool {
    customer.bonus_points_balance.is_none()
        || customer.bonus_points_balance != external.bonus_points_balance
}
