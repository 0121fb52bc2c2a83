use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use customer_sync_core::customers::{Customer, CustomerRepositoryTrait, ShoppingList};
use customer_sync_core::errors::{DatabaseError, Error, Result};

use super::model::{CustomerDB, ShoppingListDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{customers, shopping_lists};

/// Repository for customer records and standalone shopping lists
pub struct CustomerRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }

    /// Lists every customer, oldest first.
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = customers::table
            .select(CustomerDB::as_select())
            .order((customers::created_at.asc(), customers::internal_id.asc()))
            .load::<CustomerDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Customer::try_from(row).map_err(Error::from))
            .collect()
    }

    pub fn get_customer(&self, internal_id: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customers::table
            .find(internal_id)
            .select(CustomerDB::as_select())
            .first::<CustomerDB>(&mut conn)
            .optional()
            .into_core()?;
        to_domain(row)
    }

    /// Lists the standalone shopping lists in insertion order.
    pub fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = shopping_lists::table
            .select(ShoppingListDB::as_select())
            .order((shopping_lists::created_at.asc(), shopping_lists::id.asc()))
            .load::<ShoppingListDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| ShoppingList::try_from(row).map_err(Error::from))
            .collect()
    }
}

fn to_domain(row: Option<CustomerDB>) -> Result<Option<Customer>> {
    row.map(|r| Customer::try_from(r).map_err(Error::from))
        .transpose()
}

// Finders return the most recently created row when several share the value.
// A demoted record keeps its external id, so its replacement must win.
#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    fn find_by_external_id(&self, external_id: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customers::table
            .filter(customers::external_id.eq(external_id))
            .order((customers::created_at.desc(), customers::internal_id.desc()))
            .select(CustomerDB::as_select())
            .first::<CustomerDB>(&mut conn)
            .optional()
            .into_core()?;
        to_domain(row)
    }

    fn find_by_master_external_id(&self, master_external_id: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customers::table
            .filter(customers::master_external_id.eq(master_external_id))
            .order((customers::created_at.desc(), customers::internal_id.desc()))
            .select(CustomerDB::as_select())
            .first::<CustomerDB>(&mut conn)
            .optional()
            .into_core()?;
        to_domain(row)
    }

    fn find_by_company_number(&self, company_number: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customers::table
            .filter(customers::company_number.eq(company_number))
            .order((customers::created_at.desc(), customers::internal_id.desc()))
            .select(CustomerDB::as_select())
            .first::<CustomerDB>(&mut conn)
            .optional()
            .into_core()?;
        to_domain(row)
    }

    async fn create_customer(&self, customer: Customer) -> Result<Customer> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Customer> {
                let now = chrono::Utc::now().naive_utc();
                let row = CustomerDB::from_domain(&customer, Uuid::new_v4().to_string(), now)?;

                diesel::insert_into(customers::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;

                debug!("Inserted customer {}", row.internal_id);
                Ok(Customer::try_from(row)?)
            })
            .await
    }

    async fn update_customer(&self, customer: Customer) -> Result<Customer> {
        let internal_id = customer.internal_id.clone().ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(
                "Cannot update a customer without internal id".to_string(),
            ))
        })?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Customer> {
                let existing = customers::table
                    .find(internal_id.as_str())
                    .select(CustomerDB::as_select())
                    .first::<CustomerDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Customer {} not found",
                            internal_id
                        )))
                    })?;

                let mut row = CustomerDB::from_domain(
                    &customer,
                    internal_id.clone(),
                    chrono::Utc::now().naive_utc(),
                )?;
                row.created_at = existing.created_at;

                diesel::update(customers::table.find(internal_id.as_str()))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;

                Ok(Customer::try_from(row)?)
            })
            .await
    }

    async fn update_shopping_list(&self, shopping_list: ShoppingList) -> Result<()> {
        let products =
            serde_json::to_string(&shopping_list.products).map_err(StorageError::from)?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let now = chrono::Utc::now().naive_utc();

                let touched = diesel::update(
                    shopping_lists::table.filter(shopping_lists::products.eq(products.as_str())),
                )
                .set(shopping_lists::updated_at.eq(now))
                .execute(conn)
                .into_core()?;

                if touched == 0 {
                    let row = ShoppingListDB {
                        id: Uuid::new_v4().to_string(),
                        products,
                        created_at: now,
                        updated_at: now,
                    };
                    diesel::insert_into(shopping_lists::table)
                        .values(&row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(())
            })
            .await
    }
}
