use custbook_core::db::schema::{customers_table_exists, ensure_schema};
use custbook_core::{
    ConfigError, ConnectionProvider, CustomerRepository, CustomerStore, DbError,
    SqliteCustomerRepository, StoreConfig, StoreError,
};
use rusqlite::Connection;

#[test]
fn blank_path_is_a_configuration_error() {
    let err = ConnectionProvider::from_path("  ").unwrap_err();
    assert!(matches!(err, DbError::Configuration(ConfigError::EmptyPath)));

    let err = CustomerStore::open_path("").err().unwrap();
    assert!(matches!(
        err,
        StoreError::Configuration(ConfigError::EmptyPath)
    ));
}

#[test]
fn acquire_creates_missing_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");
    assert!(!path.exists());

    let provider = ConnectionProvider::new(StoreConfig::new(&path).unwrap());
    let conn = provider.acquire().unwrap();
    drop(conn);

    assert!(path.exists());
}

#[test]
fn ensure_schema_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");

    let conn = Connection::open(&path).unwrap();
    ensure_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO customers (phone, name, address, email) VALUES ('5551234', 'Ann', 'Main', NULL);",
        [],
    )
    .unwrap();
    ensure_schema(&conn).unwrap();

    assert!(customers_table_exists(&conn).unwrap());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM customers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_store_creates_customers_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");

    let store = CustomerStore::open_path(&path).unwrap();
    assert!(store.list_all().is_empty());

    let conn = Connection::open(&path).unwrap();
    assert!(customers_table_exists(&conn).unwrap());
}

#[test]
fn opening_store_in_missing_directory_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("shop.db");

    let err = CustomerStore::open(StoreConfig::new(&path).unwrap())
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::Storage(_)));
}

#[test]
fn repository_ensure_schema_reports_storage_failure() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::new(StoreConfig::new(dir.path()).unwrap());
    let repo = SqliteCustomerRepository::new(provider);

    assert!(repo.ensure_schema().is_err());
}

#[test]
fn path_with_surrounding_spaces_opens_that_exact_file() {
    let dir = tempfile::tempdir().unwrap();
    let spaced = dir.path().join(" shop.db ");

    let store = CustomerStore::open_path(&spaced).unwrap();
    assert!(store.list_all().is_empty());

    assert!(spaced.exists());
    assert!(!dir.path().join("shop.db").exists());
}
