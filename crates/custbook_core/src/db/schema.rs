//! Customer table schema.
//!
//! # Invariants
//! - Schema creation is idempotent; existing rows are never touched.
//! - There is exactly one table, keyed by normalized phone.

use super::DbResult;
use rusqlite::Connection;

const CUSTOMERS_SQL: &str = include_str!("customers.sql");

/// Creates the `customers` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CUSTOMERS_SQL)?;
    Ok(())
}

/// Returns whether the `customers` table is present.
pub fn customers_table_exists(conn: &Connection) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'customers'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
