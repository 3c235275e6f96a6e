//! Customer store use-case service.
//!
//! # Responsibility
//! - Normalize and validate raw customer input before any storage call.
//! - Expose the repository surface consumed by presentation code.
//! - Drive bulk CSV import/export.
//!
//! # Invariants
//! - Invalid input never reaches the record access layer.
//! - Per-operation storage failures degrade to `false`, `None` or an empty
//!   listing and are logged at `warn`; only construction fails hard.
//! - Callers that must tell absence from outage use the `try_*` variants.
//! - Log events carry counters and status only, never customer field values.

use crate::config::{ConfigError, StoreConfig};
use crate::db::ConnectionProvider;
use crate::exchange::{self, ExchangeError, ImportSummary};
use crate::model::customer::{normalize_phone, Customer};
use crate::repo::customer_repo::{
    CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository,
};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Fatal error raised while opening a customer store.
#[derive(Debug)]
pub enum StoreError {
    Configuration(ConfigError),
    /// Schema could not be ensured.
    Storage(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "failed to ensure customers table: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Validating facade over a customer repository.
pub struct CustomerStore<R: CustomerRepository> {
    repo: R,
}

impl CustomerStore<SqliteCustomerRepository> {
    /// Opens the SQLite store described by `config` and ensures its schema.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the file cannot be opened or the table
    ///   cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let repo = SqliteCustomerRepository::new(ConnectionProvider::new(config));
        Self::new(repo)
    }

    /// Opens a store from a raw path.
    ///
    /// # Errors
    /// - `StoreError::Configuration` when the path is blank.
    /// - Any error from [`CustomerStore::open`].
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(StoreConfig::new(path)?)
    }
}

impl<R: CustomerRepository> CustomerStore<R> {
    /// Wraps a repository and ensures its schema exists.
    pub fn new(repo: R) -> Result<Self, StoreError> {
        if let Err(err) = repo.ensure_schema() {
            warn!("event=store_open module=store status=error error_code=schema_failed error={err}");
            return Err(err.into());
        }
        info!("event=store_open module=store status=ok");
        Ok(Self { repo })
    }

    /// Returns the wrapped repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and inserts a customer.
    ///
    /// Returns `false` for invalid input, an existing phone, or a storage failure.
    pub fn insert(&self, customer: &Customer) -> bool {
        let Some(customer) = self.prepare_write("insert", customer) else {
            return false;
        };
        self.degrade("insert", self.repo.insert(&customer), false)
    }

    /// Validates and replaces the customer keyed by its phone.
    ///
    /// Returns `false` for invalid input, an unknown phone, or a storage failure.
    pub fn update(&self, customer: &Customer) -> bool {
        let Some(customer) = self.prepare_write("update", customer) else {
            return false;
        };
        self.degrade("update", self.repo.update(&customer), false)
    }

    /// Deletes by phone after normalization.
    pub fn delete(&self, phone_raw: &str) -> bool {
        let phone = normalize_phone(phone_raw);
        self.degrade("delete", self.repo.delete(&phone), false)
    }

    /// Looks up one customer by phone.
    ///
    /// Storage failures are reported as `None`, same as absence.
    pub fn get_by_phone(&self, phone_raw: &str) -> Option<Customer> {
        self.degrade("get", self.try_get_by_phone(phone_raw), None)
    }

    /// Looks up one customer, keeping storage failures distinct from absence.
    pub fn try_get_by_phone(&self, phone_raw: &str) -> RepoResult<Option<Customer>> {
        self.repo.find(&normalize_phone(phone_raw))
    }

    /// Lists every customer by name. Storage failures yield an empty list.
    pub fn list_all(&self) -> Vec<Customer> {
        self.degrade("list", self.try_list_all(), Vec::new())
    }

    pub fn try_list_all(&self) -> RepoResult<Vec<Customer>> {
        self.repo.list_all()
    }

    /// Imports a CSV file and returns a one-line summary.
    ///
    /// On success: `Total: T | Added: A | Updated: U | Skipped: S`.
    /// On I/O or storage failure: `Import error: <message>`.
    pub fn import_csv(&self, path: impl AsRef<Path>) -> String {
        match self.import_csv_report(path) {
            Ok(summary) => summary.to_string(),
            Err(err) => format!("Import error: {err}"),
        }
    }

    /// Imports a CSV file, returning typed counters or the aborting error.
    pub fn import_csv_report(&self, path: impl AsRef<Path>) -> Result<ImportSummary, ExchangeError> {
        exchange::import_csv(&self.repo, path).map_err(|err| {
            warn!("event=csv_import module=store status=error error={err}");
            err
        })
    }

    /// Exports every customer to `path`. Returns `false` on any failure.
    pub fn save_to_csv(&self, path: impl AsRef<Path>) -> bool {
        self.export_csv(path).is_ok()
    }

    /// Exports every customer, returning the number of rows written.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<usize, ExchangeError> {
        exchange::export_csv(&self.repo, path).map_err(|err| {
            warn!("event=csv_export module=store status=error error={err}");
            err
        })
    }

    fn prepare_write(&self, op: &str, customer: &Customer) -> Option<Customer> {
        let normalized = customer.normalized();
        match normalized.validate() {
            Ok(()) => Some(normalized),
            Err(err) => {
                debug!("event=customer_{op} module=store status=rejected reason={err:?}");
                None
            }
        }
    }

    fn degrade<T>(&self, op: &str, result: RepoResult<T>, fallback: T) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                warn!("event=customer_{op} module=store status=error error={err}");
                fallback
            }
        }
    }
}
