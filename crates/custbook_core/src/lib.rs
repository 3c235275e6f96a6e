//! Core record management for custbook.
//! This crate is the single source of truth for customer invariants.

pub mod config;
pub mod db;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig, DB_PATH_ENV};
pub use db::{ConnectionProvider, DbError, DbResult};
pub use exchange::{ExchangeError, ImportSummary, EXPORT_HEADER};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{
    email_error, is_valid_address, is_valid_email, is_valid_name, is_valid_phone,
    normalize_phone, Customer, CustomerValidationError,
};
pub use repo::customer_repo::{
    CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use service::customer_store::{CustomerStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
