//! Customer storage: diesel models and the repository.

mod model;
mod repository;

pub use model::{CustomerDB, ShoppingListDB};
pub use repository::CustomerRepository;
