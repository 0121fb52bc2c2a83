//! Match result models.

use serde::{Deserialize, Serialize};

use crate::customers::Customer;

/// Which field produced the primary match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTerm {
    /// Nothing matched
    #[default]
    None,
    ByExternalId,
    ByCompanyNumber,
}

/// Outcome of matching one external customer against the internal store.
///
/// `customer` is the merge target; `None` means a new record must be created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMatches {
    pub customer: Option<Customer>,
    pub duplicates: Vec<Customer>,
    pub match_term: MatchTerm,
}

impl CustomerMatches {
    pub fn matched(customer: Customer, match_term: MatchTerm) -> Self {
        Self {
            customer: Some(customer),
            duplicates: Vec::new(),
            match_term,
        }
    }

    pub fn add_duplicate(&mut self, duplicate: Customer) {
        self.duplicates.push(duplicate);
    }

    /// Moves the primary match to the end of the duplicates.
    pub fn demote_primary(&mut self) {
        if let Some(customer) = self.customer.take() {
            self.duplicates.push(customer);
        }
    }
}
