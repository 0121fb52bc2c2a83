#[cfg(test)]
mod tests {
    use crate::customers::{
        Customer, CustomerDataAccessTrait, CustomerType, ExternalCustomer, ShoppingList,
    };
    use crate::errors::Result;
    use crate::sync::{CustomerMatchResolver, CustomerMatches, MatchTerm};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- Mock data access returning a canned match ---
    struct MockDataAccess {
        company_match: Mutex<Option<CustomerMatches>>,
        person_match: Mutex<Option<CustomerMatches>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockDataAccess {
        fn new() -> Self {
            Self {
                company_match: Mutex::new(None),
                person_match: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_company_match(self, matches: CustomerMatches) -> Self {
            *self.company_match.lock().unwrap() = Some(matches);
            self
        }

        fn with_person_match(self, matches: CustomerMatches) -> Self {
            *self.person_match.lock().unwrap() = Some(matches);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CustomerDataAccessTrait for MockDataAccess {
        fn load_company_match(
            &self,
            external_id: &str,
            company_number: &str,
        ) -> Result<CustomerMatches> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("company:{}:{}", external_id, company_number));
            Ok(self.company_match.lock().unwrap().take().unwrap_or_default())
        }

        fn load_person_match(&self, external_id: &str) -> Result<CustomerMatches> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("person:{}", external_id));
            Ok(self.person_match.lock().unwrap().take().unwrap_or_default())
        }

        async fn create_customer(&self, _customer: Customer) -> Result<Customer> {
            unimplemented!()
        }

        async fn update_customer(&self, _customer: Customer) -> Result<Customer> {
            unimplemented!()
        }

        async fn update_shopping_list(&self, _shopping_list: ShoppingList) -> Result<()> {
            unimplemented!()
        }
    }

    fn company(external_id: &str, company_number: &str) -> ExternalCustomer {
        ExternalCustomer {
            external_id: external_id.to_string(),
            company_number: Some(company_number.to_string()),
            ..Default::default()
        }
    }

    fn person(external_id: &str) -> ExternalCustomer {
        ExternalCustomer {
            external_id: external_id.to_string(),
            ..Default::default()
        }
    }

    fn stored_company(external_id: Option<&str>, company_number: &str) -> Customer {
        Customer {
            internal_id: Some("45435".to_string()),
            external_id: external_id.map(str::to_string),
            company_number: Some(company_number.to_string()),
            customer_type: Some(CustomerType::Company),
            ..Default::default()
        }
    }

    #[test]
    fn test_dispatch_on_company_number() {
        let data_access = Arc::new(MockDataAccess::new());
        let resolver = CustomerMatchResolver::new(data_access.clone());

        resolver.resolve(&company("12345", "470813-8895")).unwrap();
        resolver.resolve(&person("777")).unwrap();

        assert_eq!(
            data_access.calls(),
            vec!["company:12345:470813-8895", "person:777"]
        );
    }

    #[test]
    fn test_no_match_is_returned_unchanged() {
        let resolver = CustomerMatchResolver::new(Arc::new(MockDataAccess::new()));

        let matches = resolver.resolve(&company("12345", "470813-8895")).unwrap();

        assert!(matches.customer.is_none());
        assert!(matches.duplicates.is_empty());
        assert_eq!(matches.match_term, MatchTerm::None);
    }

    #[test]
    fn test_company_same_number_by_external_id_stays_primary() {
        let data_access = MockDataAccess::new().with_company_match(CustomerMatches::matched(
            stored_company(Some("12345"), "470813-8895"),
            MatchTerm::ByExternalId,
        ));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let matches = resolver.resolve(&company("12345", "470813-8895")).unwrap();

        assert!(matches.customer.is_some());
        assert!(matches.duplicates.is_empty());
    }

    #[test]
    fn test_company_other_number_by_external_id_is_demoted_after_existing_duplicates() {
        let mut canned = CustomerMatches::matched(
            stored_company(Some("12345"), "000-3234"),
            MatchTerm::ByExternalId,
        );
        let earlier = Customer {
            internal_id: Some("1".to_string()),
            customer_type: Some(CustomerType::Company),
            ..Default::default()
        };
        canned.add_duplicate(earlier);
        let resolver =
            CustomerMatchResolver::new(Arc::new(MockDataAccess::new().with_company_match(canned)));

        let matches = resolver.resolve(&company("12345", "470813-8895")).unwrap();

        assert!(matches.customer.is_none());
        assert_eq!(matches.duplicates.len(), 2);
        assert_eq!(matches.duplicates[0].internal_id.as_deref(), Some("1"));
        assert_eq!(
            matches.duplicates[1].company_number.as_deref(),
            Some("000-3234")
        );
    }

    #[test]
    fn test_company_by_number_with_same_external_id_is_adopted() {
        let data_access = MockDataAccess::new().with_company_match(CustomerMatches::matched(
            stored_company(Some("12345"), "470813-8895"),
            MatchTerm::ByCompanyNumber,
        ));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let matches = resolver.resolve(&company("12345", "470813-8895")).unwrap();

        let customer = matches.customer.unwrap();
        assert_eq!(customer.external_id.as_deref(), Some("12345"));
        assert_eq!(customer.master_external_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_company_by_number_with_other_external_id_conflicts() {
        let data_access = MockDataAccess::new().with_company_match(CustomerMatches::matched(
            stored_company(Some("99999"), "470813-8895"),
            MatchTerm::ByCompanyNumber,
        ));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let err = resolver
            .resolve(&company("12345", "470813-8895"))
            .unwrap_err();

        assert!(err.as_conflict().unwrap().is_identifier_conflict());
    }

    #[test]
    fn test_company_type_is_checked_before_match_term() {
        let mut stored = stored_company(Some("99999"), "470813-8895");
        stored.customer_type = Some(CustomerType::Person);
        let data_access = MockDataAccess::new()
            .with_company_match(CustomerMatches::matched(stored, MatchTerm::ByCompanyNumber));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let err = resolver
            .resolve(&company("12345", "470813-8895"))
            .unwrap_err();

        assert!(err.as_conflict().unwrap().is_type_conflict());
    }

    #[test]
    fn test_person_matched_by_other_means_adopts_external_id() {
        let stored = Customer {
            internal_id: Some("67576".to_string()),
            external_id: Some("old".to_string()),
            customer_type: Some(CustomerType::Person),
            ..Default::default()
        };
        let data_access = MockDataAccess::new()
            .with_person_match(CustomerMatches::matched(stored, MatchTerm::None));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let matches = resolver.resolve(&person("12345")).unwrap();

        let customer = matches.customer.unwrap();
        assert_eq!(customer.external_id.as_deref(), Some("12345"));
        assert_eq!(customer.master_external_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_person_matched_by_external_id_keeps_master_id() {
        let stored = Customer {
            internal_id: Some("67576".to_string()),
            external_id: Some("12345".to_string()),
            master_external_id: Some("master".to_string()),
            customer_type: Some(CustomerType::Person),
            ..Default::default()
        };
        let data_access = MockDataAccess::new()
            .with_person_match(CustomerMatches::matched(stored, MatchTerm::ByExternalId));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let matches = resolver.resolve(&person("12345")).unwrap();

        assert_eq!(
            matches.customer.unwrap().master_external_id.as_deref(),
            Some("master")
        );
    }

    #[test]
    fn test_person_against_company_conflicts() {
        let data_access = MockDataAccess::new().with_person_match(CustomerMatches::matched(
            stored_company(Some("12345"), "32423-342"),
            MatchTerm::ByExternalId,
        ));
        let resolver = CustomerMatchResolver::new(Arc::new(data_access));

        let err = resolver.resolve(&person("12345")).unwrap_err();

        assert!(err.as_conflict().unwrap().is_type_conflict());
    }
}
