use log::{debug, warn};
use std::sync::Arc;

use super::match_model::{CustomerMatches, MatchTerm};
use crate::customers::{CustomerDataAccessTrait, CustomerType, ExternalCustomer};
use crate::errors::{ConflictError, Result};

/// Finds the internal record an external customer should be merged into.
///
/// Companies are matched by external id, then company number. A hit by
/// external id with a different company number is demoted to a duplicate.
/// A hit by company number adopts the incoming external id unless the record
/// already carries a different one. Persons are matched by external id only.
pub struct CustomerMatchResolver {
    data_access: Arc<dyn CustomerDataAccessTrait>,
}

impl CustomerMatchResolver {
    pub fn new(data_access: Arc<dyn CustomerDataAccessTrait>) -> Self {
        Self { data_access }
    }

    pub fn resolve(&self, external: &ExternalCustomer) -> Result<CustomerMatches> {
        match &external.company_number {
            Some(company_number) => self.resolve_company(external, company_number),
            None => self.resolve_person(external),
        }
    }

    fn resolve_company(
        &self,
        external: &ExternalCustomer,
        company_number: &str,
    ) -> Result<CustomerMatches> {
        let external_id = external.external_id.as_str();
        let mut matches = self
            .data_access
            .load_company_match(external_id, company_number)?;
        debug!(
            "Company match for {} / {}: {:?}",
            external_id, company_number, matches.match_term
        );

        ensure_type(&matches, external_id, CustomerType::Company)?;

        match matches.match_term {
            MatchTerm::ByExternalId => {
                let same_company = matches
                    .customer
                    .as_ref()
                    .map(|c| c.company_number.as_deref() == Some(company_number))
                    .unwrap_or(true);
                if !same_company {
                    debug!(
                        "Customer matched by external id {} belongs to another company, demoting to duplicate",
                        external_id
                    );
                    matches.demote_primary();
                }
            }
            MatchTerm::ByCompanyNumber => {
                if let Some(customer) = matches.customer.as_mut() {
                    if let Some(existing) = customer.external_id.as_deref() {
                        if existing != external_id {
                            warn!(
                                "Company {} is already linked to external id {}, rejecting {}",
                                company_number, existing, external_id
                            );
                            return Err(ConflictError::identifier_conflict(
                                company_number,
                                external_id,
                                existing,
                            )
                            .into());
                        }
                    }
                    debug!(
                        "Adopting external id {} for company {}",
                        external_id, company_number
                    );
                    customer.adopt_external_id(external_id);
                }
            }
            MatchTerm::None => {}
        }

        Ok(matches)
    }

    fn resolve_person(&self, external: &ExternalCustomer) -> Result<CustomerMatches> {
        let external_id = external.external_id.as_str();
        let mut matches = self.data_access.load_person_match(external_id)?;
        debug!("Person match for {}: {:?}", external_id, matches.match_term);

        ensure_type(&matches, external_id, CustomerType::Person)?;

        if matches.match_term != MatchTerm::ByExternalId {
            if let Some(customer) = matches.customer.as_mut() {
                debug!("Adopting external id {} for person", external_id);
                customer.adopt_external_id(external_id);
            }
        }

        Ok(matches)
    }
}

/// A matched record must already be of the expected type. An untyped record
/// counts as a mismatch.
fn ensure_type(
    matches: &CustomerMatches,
    external_id: &str,
    expected: CustomerType,
) -> Result<()> {
    if let Some(customer) = &matches.customer {
        if customer.customer_type != Some(expected) {
            warn!(
                "Customer matched for {} has type {:?}, expected {}",
                external_id, customer.customer_type, expected
            );
            return Err(ConflictError::type_conflict(external_id, expected).into());
        }
    }
    Ok(())
}
