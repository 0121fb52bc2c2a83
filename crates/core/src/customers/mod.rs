//! Customers module - domain models, merge rules, and persistence traits.

mod customer_mapper;
mod customers_data_access;
mod customers_model;
mod customers_traits;


// Re-export the public interface
pub use customer_mapper::{build_new_customer, merge_as_duplicate, merge_full};
pub use customers_data_access::CustomerDataAccess;
pub use customers_model::{
    Address, Customer, CustomerIdentity, CustomerType, ExternalCustomer, ShoppingList,
};
pub use customers_traits::{CustomerDataAccessTrait, CustomerRepositoryTrait};
