//! Sync module - match resolution and the customer sync service.

mod match_model;
mod match_resolver;
mod sync_service;
mod sync_traits;

#[cfg(test)]
mod match_resolver_tests;


pub use match_model::{CustomerMatches, MatchTerm};
pub use match_resolver::CustomerMatchResolver;
pub use sync_service::CustomerSyncService;
pub use sync_traits::CustomerSyncServiceTrait;
