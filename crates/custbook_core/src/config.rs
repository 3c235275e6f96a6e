//! Store location configuration.
//!
//! # Responsibility
//! - Carry the embedded database file location as an explicit value.
//! - Resolve the location from an explicit argument or the environment.
//!
//! # Invariants
//! - A `StoreConfig` never holds a blank path.
//! - A non-blank path is kept exactly as given, surrounding spaces included.
//! - There is no process-wide mutable store location; callers pass the value
//!   into `ConnectionProvider::new` / `CustomerStore::open`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no explicit path is given.
pub const DB_PATH_ENV: &str = "CUSTBOOK_DB";

/// Store configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No database path was provided by the caller or the environment.
    NotConfigured,
    /// Provided database path is empty or whitespace only.
    EmptyPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(
                f,
                "database path not set; pass --db or set {DB_PATH_ENV}"
            ),
            Self::EmptyPath => write!(f, "database path cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Location of the embedded customer database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    db_path: PathBuf,
}

impl StoreConfig {
    /// Creates a config for the given database file.
    ///
    /// # Errors
    /// - `ConfigError::EmptyPath` when `db_path` is blank.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let db_path = db_path.as_ref();
        if db_path.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        Ok(Self {
            db_path: db_path.to_path_buf(),
        })
    }

    /// Resolves the config from an explicit path, falling back to `CUSTBOOK_DB`.
    ///
    /// # Errors
    /// - `ConfigError::NotConfigured` when neither source provides a path.
    /// - `ConfigError::EmptyPath` when the chosen source is blank.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        match std::env::var_os(DB_PATH_ENV) {
            Some(value) => Self::new(PathBuf::from(value)),
            None => Err(ConfigError::NotConfigured),
        }
    }

    /// Returns the configured database file path.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig};
    use std::path::{Path, PathBuf};

    #[test]
    fn new_rejects_blank_path() {
        assert_eq!(StoreConfig::new("   ").unwrap_err(), ConfigError::EmptyPath);
        assert_eq!(StoreConfig::new("").unwrap_err(), ConfigError::EmptyPath);
    }

    #[test]
    fn new_keeps_surrounding_spaces_in_path() {
        let config = StoreConfig::new(" shop.db").unwrap();
        assert_eq!(config.db_path(), Path::new(" shop.db"));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let config = StoreConfig::resolve(Some(PathBuf::from("explicit.db"))).unwrap();
        assert_eq!(config.db_path(), Path::new("explicit.db"));
    }
}
