use async_trait::async_trait;

use crate::customers::ExternalCustomer;
use crate::errors::Result;

/// Trait defining the contract for customer sync operations.
#[async_trait]
pub trait CustomerSyncServiceTrait: Send + Sync {
    /// Reconciles one external customer with the internal store.
    ///
    /// Returns `true` when a new internal record was created and `false` when
    /// an existing one was updated.
    async fn sync_customer(&self, external: &ExternalCustomer) -> Result<bool>;
}
