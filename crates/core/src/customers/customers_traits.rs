//! Customer repository and data-access traits.
//!
//! These traits define the persistence contract without any database-specific
//! types, allowing for different storage implementations.

use async_trait::async_trait;

use super::customers_model::{Customer, ShoppingList};
use crate::errors::Result;
use crate::sync::CustomerMatches;

/// Trait defining the contract for customer record storage.
///
/// Implementations handle lookups by a single field and the raw writes.
/// Matching rules live above this trait. When several records share the
/// looked-up value, finders return the most recently created one.
#[async_trait]
pub trait CustomerRepositoryTrait: Send + Sync {
    /// Finds the customer whose external id equals `external_id`.
    fn find_by_external_id(&self, external_id: &str) -> Result<Option<Customer>>;

    /// Finds the customer whose master external id equals `master_external_id`.
    fn find_by_master_external_id(&self, master_external_id: &str) -> Result<Option<Customer>>;

    /// Finds the customer registered under `company_number`.
    fn find_by_company_number(&self, company_number: &str) -> Result<Option<Customer>>;

    /// Inserts a new customer and returns it with its assigned internal id.
    async fn create_customer(&self, customer: Customer) -> Result<Customer>;

    /// Persists changes to an existing customer, identified by internal id.
    async fn update_customer(&self, customer: Customer) -> Result<Customer>;

    /// Persists one shopping list on its own.
    async fn update_shopping_list(&self, shopping_list: ShoppingList) -> Result<()>;
}

/// Persistence port used by the match resolver and the sync service.
#[async_trait]
pub trait CustomerDataAccessTrait: Send + Sync {
    /// Looks up by external id first, falling back to company number.
    fn load_company_match(&self, external_id: &str, company_number: &str)
        -> Result<CustomerMatches>;

    /// Looks up by external id only.
    fn load_person_match(&self, external_id: &str) -> Result<CustomerMatches>;

    /// Creates the customer; the returned record carries its internal id.
    async fn create_customer(&self, customer: Customer) -> Result<Customer>;

    async fn update_customer(&self, customer: Customer) -> Result<Customer>;

    async fn update_shopping_list(&self, shopping_list: ShoppingList) -> Result<()>;
}
