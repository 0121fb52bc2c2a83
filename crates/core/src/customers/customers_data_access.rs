use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::customers_model::{Customer, ShoppingList};
use super::customers_traits::{CustomerDataAccessTrait, CustomerRepositoryTrait};
use crate::errors::Result;
use crate::sync::{CustomerMatches, MatchTerm};

/// Builds match results out of single-field repository lookups.
pub struct CustomerDataAccess {
    repository: Arc<dyn CustomerRepositoryTrait>,
}

impl CustomerDataAccess {
    pub fn new(repository: Arc<dyn CustomerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CustomerDataAccessTrait for CustomerDataAccess {
    fn load_company_match(
        &self,
        external_id: &str,
        company_number: &str,
    ) -> Result<CustomerMatches> {
        if let Some(customer) = self.repository.find_by_external_id(external_id)? {
            let primary_id = customer.internal_id.clone();
            let mut matches = CustomerMatches::matched(customer, MatchTerm::ByExternalId);

            // Records that name this external id as their master are duplicates,
            // unless the lookup found the primary record again.
            if let Some(by_master) = self.repository.find_by_master_external_id(external_id)? {
                if primary_id.is_none() || by_master.internal_id != primary_id {
                    debug!(
                        "Found duplicate {:?} by master external id {}",
                        by_master.internal_id, external_id
                    );
                    matches.add_duplicate(by_master);
                }
            }
            return Ok(matches);
        }

        match self.repository.find_by_company_number(company_number)? {
            Some(customer) => Ok(CustomerMatches::matched(
                customer,
                MatchTerm::ByCompanyNumber,
            )),
            None => Ok(CustomerMatches::default()),
        }
    }

    fn load_person_match(&self, external_id: &str) -> Result<CustomerMatches> {
        Ok(match self.repository.find_by_external_id(external_id)? {
            Some(customer) => CustomerMatches::matched(customer, MatchTerm::ByExternalId),
            None => CustomerMatches::default(),
        })
    }

    async fn create_customer(&self, customer: Customer) -> Result<Customer> {
        self.repository.create_customer(customer).await
    }

    async fn update_customer(&self, customer: Customer) -> Result<Customer> {
        self.repository.update_customer(customer).await
    }

    async fn update_shopping_list(&self, shopping_list: ShoppingList) -> Result<()> {
        self.repository.update_shopping_list(shopping_list).await
    }
}
