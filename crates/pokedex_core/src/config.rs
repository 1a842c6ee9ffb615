//! Connection configuration and insert target.
//!
//! # Responsibility
//! - Carry the static connection settings passed into the persistence call.
//! - Validate table/column identifiers before they are interpolated into SQL.
//!
//! # Invariants
//! - `DbConfig` is always injected by the caller, never read from globals.
//! - `InsertTarget` identifiers match `^[A-Za-z_][A-Za-z0-9_]*$`.
//! - The password never appears in `Debug` output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// In-memory database name understood by the SQLite connector.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    EmptyDatabase,
    InvalidPort,
    InvalidPoolSize,
    InvalidIdentifier(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::EmptyDatabase => write!(f, "database cannot be empty"),
            Self::InvalidPort => write!(f, "port must be in 1..=65535"),
            Self::InvalidPoolSize => write!(f, "pool_size must be at least 1"),
            Self::InvalidIdentifier(value) => write!(f, "invalid SQL identifier `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Static connection settings.
///
/// Only `database` selects the store for the embedded SQLite connector.
/// `host`, `user`, `password` and `port` are carried for network backends;
/// `pool_size` and `wait_for_capacity` are inert because exactly one
/// connection is opened per call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    #[serde(alias = "connectionLimit")]
    pub pool_size: u32,
    #[serde(alias = "waitForConnections")]
    pub wait_for_capacity: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: "1234".to_string(),
            database: "POKEMON EXAMPLE".to_string(),
            port: 3306,
            pool_size: 5,
            wait_for_capacity: true,
        }
    }
}

impl Debug for DbConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("pool_size", &self.pool_size)
            .field("wait_for_capacity", &self.wait_for_capacity)
            .finish()
    }
}

impl DbConfig {
    /// Default settings pointed at an in-memory store.
    pub fn in_memory() -> Self {
        Self {
            database: IN_MEMORY_DATABASE.to_string(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config. Missing keys fall back to defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::EmptyDatabase);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        Ok(())
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }
}

/// Table and column names for the three-column insert.
///
/// Columns are listed in binding order: name, type, level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTarget {
    table: String,
    columns: [String; 3],
}

impl Default for InsertTarget {
    fn default() -> Self {
        Self {
            table: "pokemon".to_string(),
            columns: ["name".to_string(), "type".to_string(), "level".to_string()],
        }
    }
}

impl InsertTarget {
    pub fn new(table: &str, columns: [&str; 3]) -> Result<Self, ConfigError> {
        let table = checked_identifier(table)?;
        let [name, kind, level] = columns;
        Ok(Self {
            table,
            columns: [
                checked_identifier(name)?,
                checked_identifier(kind)?,
                checked_identifier(level)?,
            ],
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String; 3] {
        &self.columns
    }
}

fn checked_identifier(value: &str) -> Result<String, ConfigError> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidIdentifier(value.to_string()))
    }
}
