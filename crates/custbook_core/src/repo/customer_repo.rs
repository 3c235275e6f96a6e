//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the raw persistence primitives over the `customers` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - This layer does not validate content; callers pass normalized records.
//! - `insert` is insert-if-absent and reports `false` on an existing key.
//! - Every operation acquires its own connection and drops it before
//!   returning, on success and failure alike.

use crate::db::schema::ensure_schema;
use crate::db::{ConnectionProvider, DbError};
use crate::model::customer::Customer;
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    phone,
    name,
    address,
    email
FROM customers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record access interface for customer rows.
pub trait CustomerRepository {
    /// Idempotently creates the customers table.
    fn ensure_schema(&self) -> RepoResult<()>;
    /// Inserts a new row. Returns `false` when the phone already exists.
    fn insert(&self, customer: &Customer) -> RepoResult<bool>;
    /// Replaces name/address/email for an existing phone.
    fn update(&self, customer: &Customer) -> RepoResult<bool>;
    /// Deletes the row with the exact given phone.
    fn delete(&self, phone: &str) -> RepoResult<bool>;
    /// Finds one row by exact phone.
    fn find(&self, phone: &str) -> RepoResult<Option<Customer>>;
    /// Lists every row ordered by name ascending.
    fn list_all(&self) -> RepoResult<Vec<Customer>>;
}

/// SQLite-backed customer repository with one connection per call.
#[derive(Debug, Clone)]
pub struct SqliteCustomerRepository {
    provider: ConnectionProvider,
}

impl SqliteCustomerRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    fn ensure_schema(&self) -> RepoResult<()> {
        let conn = self.provider.acquire()?;
        ensure_schema(&conn)?;
        Ok(())
    }

    fn insert(&self, customer: &Customer) -> RepoResult<bool> {
        let conn = self.provider.acquire()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO customers (
                phone,
                name,
                address,
                email
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                customer.phone.as_str(),
                customer.name.as_str(),
                customer.address.as_str(),
                customer.email.as_deref(),
            ],
        )?;
        Ok(changed > 0)
    }

    fn update(&self, customer: &Customer) -> RepoResult<bool> {
        let conn = self.provider.acquire()?;
        let changed = conn.execute(
            "UPDATE customers
             SET
                name = ?1,
                address = ?2,
                email = ?3
             WHERE phone = ?4;",
            params![
                customer.name.as_str(),
                customer.address.as_str(),
                customer.email.as_deref(),
                customer.phone.as_str(),
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, phone: &str) -> RepoResult<bool> {
        let conn = self.provider.acquire()?;
        let changed = conn.execute("DELETE FROM customers WHERE phone = ?1;", [phone])?;
        Ok(changed > 0)
    }

    fn find(&self, phone: &str) -> RepoResult<Option<Customer>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE phone = ?1;"))?;
        let mut rows = stmt.query([phone])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Customer>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY name;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    // Files written by older tools store an absent email as ''.
    let email = row
        .get::<_, Option<String>>("email")?
        .filter(|value| !value.is_empty());

    Ok(Customer {
        phone: row.get("phone")?,
        name: row.get("name")?,
        address: row.get("address")?,
        email,
    })
}
