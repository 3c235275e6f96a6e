//! Connection provider for the configured store file.
//!
//! # Responsibility
//! - Open a fresh SQLite connection per logical operation.
//! - Configure connection pragmas required by core behavior.
//!
//! # Invariants
//! - Every returned connection targets `StoreConfig::db_path`.
//! - Opening a missing file creates it; schema creation is left to `schema`.
//!
//! # See also
//! - `crate::logging` for the `db_open` event format.

use super::DbResult;
use crate::config::StoreConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Supplies connections to the embedded customer database.
///
/// There is no pooling: each call to [`ConnectionProvider::acquire`] opens a
/// new connection which is closed when the caller drops it.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: StoreConfig,
}

impl ConnectionProvider {
    /// Creates a provider for an already validated config.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Creates a provider for a raw path, validating it first.
    ///
    /// # Errors
    /// - `DbError::Configuration` when the path is blank.
    pub fn from_path(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(StoreConfig::new(path)?))
    }

    /// Returns the config this provider was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a live connection to the store file.
    ///
    /// # Side effects
    /// - Creates the database file when absent.
    /// - Emits `db_open` debug/error events with duration.
    pub fn acquire(&self) -> DbResult<Connection> {
        let started_at = Instant::now();

        let conn = match Connection::open(self.config.db_path()) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        if let Err(err) = conn.busy_timeout(BUSY_TIMEOUT) {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        debug!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(conn)
    }
}
