use custbook_core::{
    ConfigError, Customer, CustomerRepository, CustomerStore, DbError, RepoError, RepoResult,
    SqliteCustomerRepository, StoreError,
};
use std::cell::Cell;
use tempfile::TempDir;

fn open_store() -> (TempDir, CustomerStore<SqliteCustomerRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let store = CustomerStore::open_path(dir.path().join("shop.db")).unwrap();
    (dir, store)
}

fn ann() -> Customer {
    Customer::new("555-123-4567", "  Ann Lee ", " 1 Main St ", Some(" ann@shop.io ".to_string()))
}

#[test]
fn insert_normalizes_before_storing() {
    let (_dir, store) = open_store();

    assert!(store.insert(&ann()));
    let stored = store.get_by_phone("5551234567").unwrap();
    assert_eq!(
        stored,
        Customer::new("5551234567", "Ann Lee", "1 Main St", Some("ann@shop.io".to_string()))
    );
}

#[test]
fn get_by_phone_accepts_any_punctuation() {
    let (_dir, store) = open_store();
    store.insert(&ann());

    let expected = ann().normalized();
    assert_eq!(store.get_by_phone("(555) 123 4567"), Some(expected.clone()));
    assert_eq!(store.get_by_phone("+555.123.4567"), Some(expected));
    assert_eq!(store.get_by_phone("555-000-0000"), None);
}

#[test]
fn second_insert_with_same_phone_is_rejected_and_keeps_record() {
    let (_dir, store) = open_store();
    assert!(store.insert(&ann()));

    let rival = Customer::new("(555)1234567", "Someone Else", "9 Far Rd", None);
    assert!(!store.insert(&rival));
    assert_eq!(store.get_by_phone("5551234567").unwrap().name, "Ann Lee");
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn invalid_input_is_rejected() {
    let (_dir, store) = open_store();

    assert!(!store.insert(&Customer::new("123456", "Ann", "Main", None)));
    assert!(!store.insert(&Customer::new("123456789012", "Ann", "Main", None)));
    assert!(!store.insert(&Customer::new("1234567", "  ", "Main", None)));
    assert!(!store.insert(&Customer::new("1234567", "Ann", "", None)));
    assert!(!store.insert(&Customer::new(
        "1234567",
        "Ann",
        "Main",
        Some("a@b".to_string())
    )));
    assert!(store.list_all().is_empty());

    assert!(store.insert(&Customer::new("1234567", "Ann", "Main", Some(String::new()))));
    assert!(store.insert(&Customer::new(
        "12345678901",
        "Bo",
        "Main",
        Some("a@b.co".to_string())
    )));
}

#[test]
fn nbsp_name_is_kept_and_control_only_name_is_rejected() {
    let (_dir, store) = open_store();

    assert!(!store.insert(&Customer::new("5550001", "\u{1}", "Main", None)));
    assert!(store.insert(&Customer::new("5550002", "\u{a0}", "Main", None)));
    assert_eq!(store.get_by_phone("5550002").unwrap().name, "\u{a0}");
}

#[test]
fn update_requires_existing_phone_and_valid_input() {
    let (_dir, store) = open_store();
    store.insert(&ann());

    let moved = Customer::new("555 123 4567", "Ann Lee", "7 New Rd", None);
    assert!(store.update(&moved));
    let stored = store.get_by_phone("5551234567").unwrap();
    assert_eq!(stored.address, "7 New Rd");
    assert_eq!(stored.email, None);

    assert!(!store.update(&Customer::new("5550000000", "Ghost", "Nowhere", None)));
    assert!(!store.update(&Customer::new("5551234567", "", "7 New Rd", None)));
    assert_eq!(store.get_by_phone("5551234567").unwrap().name, "Ann Lee");
}

#[test]
fn delete_normalizes_phone() {
    let (_dir, store) = open_store();
    store.insert(&ann());

    assert!(store.delete("(555) 123-4567"));
    assert!(!store.delete("5551234567"));
    assert_eq!(store.get_by_phone("5551234567"), None);
}

#[test]
fn list_all_is_name_ordered() {
    let (_dir, store) = open_store();
    store.insert(&Customer::new("5550002", "Bob", "Main", None));
    store.insert(&Customer::new("5550001", "Alice", "Main", None));

    let names = store
        .list_all()
        .into_iter()
        .map(|c| c.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

/// Repository whose every data call fails after a successful schema check.
#[derive(Default)]
struct BrokenRepo {
    calls: Cell<usize>,
}

impl BrokenRepo {
    fn fail<T>(&self) -> RepoResult<T> {
        self.calls.set(self.calls.get() + 1);
        Err(RepoError::Db(DbError::Configuration(
            ConfigError::NotConfigured,
        )))
    }
}

impl CustomerRepository for BrokenRepo {
    fn ensure_schema(&self) -> RepoResult<()> {
        Ok(())
    }

    fn insert(&self, _customer: &Customer) -> RepoResult<bool> {
        self.fail()
    }

    fn update(&self, _customer: &Customer) -> RepoResult<bool> {
        self.fail()
    }

    fn delete(&self, _phone: &str) -> RepoResult<bool> {
        self.fail()
    }

    fn find(&self, _phone: &str) -> RepoResult<Option<Customer>> {
        self.fail()
    }

    fn list_all(&self) -> RepoResult<Vec<Customer>> {
        self.fail()
    }
}

#[test]
fn storage_failures_degrade_to_negative_results() {
    let store = CustomerStore::new(BrokenRepo::default()).ok().unwrap();

    assert!(!store.insert(&ann()));
    assert!(!store.update(&ann()));
    assert!(!store.delete("5551234567"));
    assert_eq!(store.get_by_phone("5551234567"), None);
    assert!(store.list_all().is_empty());

    assert!(store.try_get_by_phone("5551234567").is_err());
    assert!(store.try_list_all().is_err());
}

#[test]
fn invalid_input_never_reaches_the_repository() {
    let store = CustomerStore::new(BrokenRepo::default()).ok().unwrap();

    assert!(!store.insert(&Customer::new("12", "Ann", "Main", None)));
    assert!(!store.update(&Customer::new("5551234", "", "Main", None)));
    assert_eq!(store.repository().calls.get(), 0);

    assert!(!store.insert(&ann()));
    assert_eq!(store.repository().calls.get(), 1);
}

struct NoSchemaRepo;

impl CustomerRepository for NoSchemaRepo {
    fn ensure_schema(&self) -> RepoResult<()> {
        Err(RepoError::Db(DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )))
    }

    fn insert(&self, _customer: &Customer) -> RepoResult<bool> {
        unreachable!("store must not be built")
    }

    fn update(&self, _customer: &Customer) -> RepoResult<bool> {
        unreachable!("store must not be built")
    }

    fn delete(&self, _phone: &str) -> RepoResult<bool> {
        unreachable!("store must not be built")
    }

    fn find(&self, _phone: &str) -> RepoResult<Option<Customer>> {
        unreachable!("store must not be built")
    }

    fn list_all(&self) -> RepoResult<Vec<Customer>> {
        unreachable!("store must not be built")
    }
}

#[test]
fn construction_fails_when_schema_cannot_be_ensured() {
    let err = CustomerStore::new(NoSchemaRepo).err().unwrap();
    assert!(matches!(err, StoreError::Storage(_)));
    assert!(err.to_string().starts_with("failed to ensure customers table"));
}
