//! Customer domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of customer. Persons and companies follow different match and merge rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Person,
    Company,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Person => "PERSON",
            CustomerType::Company => "COMPANY",
        }
    }

    /// Lowercase name used in user-facing messages.
    pub fn as_noun(&self) -> &'static str {
        match self {
            CustomerType::Person => "person",
            CustomerType::Company => "company",
        }
    }

    /// Parses the stored representation. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PERSON" => Some(CustomerType::Person),
            "COMPANY" => Some(CustomerType::Company),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.street, self.postal_code, self.city)
    }
}

/// An ordered list of product names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub products: Vec<String>,
}

impl ShoppingList {
    pub fn new<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Customer data as delivered by the upstream system.
///
/// The presence of a company number is what makes the record a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCustomer {
    pub external_id: String,
    pub company_number: Option<String>,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub preferred_store: Option<String>,
    /// Only meaningful for persons.
    pub bonus_points_balance: Option<i32>,
    #[serde(default)]
    pub shopping_lists: Vec<ShoppingList>,
}

impl ExternalCustomer {
    pub fn is_company(&self) -> bool {
        self.company_number.is_some()
    }

    /// The customer type this record implies.
    pub fn customer_type(&self) -> CustomerType {
        if self.is_company() {
            CustomerType::Company
        } else {
            CustomerType::Person
        }
    }
}

/// The fields that identify a customer when comparing records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentity {
    pub external_id: Option<String>,
    pub master_external_id: Option<String>,
    pub company_number: Option<String>,
}

/// Internal customer record.
///
/// `internal_id` is only ever assigned by the persistence layer; a record
/// without one has not been created yet.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub internal_id: Option<String>,
    pub external_id: Option<String>,
    pub master_external_id: Option<String>,
    pub company_number: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub preferred_store: Option<String>,
    pub bonus_points_balance: Option<i32>,
    #[serde(default)]
    pub shopping_lists: Vec<ShoppingList>,
}

impl Customer {
    pub fn identity(&self) -> CustomerIdentity {
        CustomerIdentity {
            external_id: self.external_id.clone(),
            master_external_id: self.master_external_id.clone(),
            company_number: self.company_number.clone(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.internal_id.is_some()
    }

    /// Sets external id and master external id together.
    pub fn adopt_external_id(&mut self, external_id: &str) {
        self.external_id = Some(external_id.to_string());
        self.master_external_id = Some(external_id.to_string());
    }

    pub fn add_shopping_list(&mut self, shopping_list: ShoppingList) {
        self.shopping_lists.push(shopping_list);
    }

    /// Appends lists after the existing ones. Nothing is replaced or deduplicated.
    pub fn add_shopping_lists(&mut self, shopping_lists: &[ShoppingList]) {
        self.shopping_lists.extend_from_slice(shopping_lists);
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.external_id == other.external_id
            && self.master_external_id == other.master_external_id
            && self.company_number == other.company_number
    }
}

impl Eq for Customer {}
