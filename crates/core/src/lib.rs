//! Customer sync core - domain entities, services, and traits.
//!
//! This crate reconciles customer records arriving from an external system
//! with the customers already stored. It is database-agnostic and defines
//! the traits that are implemented by the `storage-sqlite` crate.

pub mod customers;
pub mod errors;
pub mod sync;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
