//! Database models for customers and shopping lists.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use customer_sync_core::customers::{Address, Customer, CustomerType, ShoppingList};

/// Database model for customers
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(primary_key(internal_id))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerDB {
    pub internal_id: String,
    pub external_id: Option<String>,
    pub master_external_id: Option<String>,
    pub company_number: Option<String>,
    pub customer_type: Option<String>,
    pub name: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_postal_code: Option<String>,
    pub preferred_store: Option<String>,
    pub bonus_points_balance: Option<i32>,
    pub shopping_lists_json: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CustomerDB {
    /// Builds a row for `customer` stored under `internal_id`.
    pub fn from_domain(
        customer: &Customer,
        internal_id: String,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        let (street, city, postal_code) = match &customer.address {
            Some(address) => (
                Some(address.street.clone()),
                Some(address.city.clone()),
                Some(address.postal_code.clone()),
            ),
            None => (None, None, None),
        };

        Ok(Self {
            internal_id,
            external_id: customer.external_id.clone(),
            master_external_id: customer.master_external_id.clone(),
            company_number: customer.company_number.clone(),
            customer_type: customer.customer_type.map(|t| t.as_str().to_string()),
            name: customer.name.clone(),
            address_street: street,
            address_city: city,
            address_postal_code: postal_code,
            preferred_store: customer.preferred_store.clone(),
            bonus_points_balance: customer.bonus_points_balance,
            shopping_lists_json: serde_json::to_string(&customer.shopping_lists)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<CustomerDB> for Customer {
    type Error = StorageError;

    fn try_from(db: CustomerDB) -> Result<Self, Self::Error> {
        let customer_type = match db.customer_type.as_deref() {
            Some(value) => Some(CustomerType::parse(value).ok_or_else(|| {
                StorageError::SerializationError(format!("Unknown customer type '{}'", value))
            })?),
            None => None,
        };

        // An address is only stored whole.
        let address = match (db.address_street, db.address_city, db.address_postal_code) {
            (Some(street), Some(city), Some(postal_code)) => Some(Address {
                street,
                city,
                postal_code,
            }),
            _ => None,
        };

        let shopping_lists: Vec<ShoppingList> = serde_json::from_str(&db.shopping_lists_json)?;

        Ok(Customer {
            internal_id: Some(db.internal_id),
            external_id: db.external_id,
            master_external_id: db.master_external_id,
            company_number: db.company_number,
            customer_type,
            name: db.name,
            address,
            preferred_store: db.preferred_store,
            bonus_points_balance: db.bonus_points_balance,
            shopping_lists,
        })
    }
}

/// Database model for standalone shopping lists
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::shopping_lists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShoppingListDB {
    pub id: String,
    /// JSON array of product names, unique per table.
    pub products: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ShoppingListDB> for ShoppingList {
    type Error = StorageError;

    fn try_from(db: ShoppingListDB) -> Result<Self, Self::Error> {
        Ok(ShoppingList {
            products: serde_json::from_str(&db.products)?,
        })
    }
}
