use log::{debug, info};
use std::sync::Arc;

use super::match_resolver::CustomerMatchResolver;
use super::sync_traits::CustomerSyncServiceTrait;
use crate::customers::{
    merge_as_duplicate, merge_full, Customer, CustomerDataAccessTrait, ExternalCustomer,
};
use crate::errors::Result;

/// Service that reconciles external customers with the internal store.
pub struct CustomerSyncService {
    data_access: Arc<dyn CustomerDataAccessTrait>,
    resolver: CustomerMatchResolver,
}

impl CustomerSyncService {
    /// Creates a new CustomerSyncService instance
    pub fn new(data_access: Arc<dyn CustomerDataAccessTrait>) -> Self {
        Self {
            resolver: CustomerMatchResolver::new(data_access.clone()),
            data_access,
        }
    }

    /// Creates the customer when it has no internal id, updates it otherwise.
    async fn create_or_update(&self, customer: Customer) -> Result<Customer> {
        match customer.internal_id {
            None => self.data_access.create_customer(customer).await,
            Some(_) => self.data_access.update_customer(customer).await,
        }
    }
}

#[async_trait::async_trait]
impl CustomerSyncServiceTrait for CustomerSyncService {
    async fn sync_customer(&self, external: &ExternalCustomer) -> Result<bool> {
        let matches = self.resolver.resolve(external)?;
        let customer = merge_full(external, matches.customer);

        for duplicate in matches.duplicates {
            let duplicate = merge_as_duplicate(external, Some(duplicate));
            let saved = self.create_or_update(duplicate).await?;
            debug!(
                "Updated duplicate {:?} for external id {}",
                saved.internal_id, external.external_id
            );
        }

        // Lists are written on their own, not tied to the customer being synced.
        for shopping_list in &external.shopping_lists {
            self.data_access
                .update_shopping_list(shopping_list.clone())
                .await?;
        }

        let created = !customer.is_persisted();
        let saved = self.create_or_update(customer).await?;
        info!(
            "{} customer {:?} for external id {}",
            if created { "Created" } else { "Updated" },
            saved.internal_id,
            external.external_id
        );

        Ok(created)
    }
}
