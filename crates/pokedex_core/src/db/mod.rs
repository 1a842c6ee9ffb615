//! Storage connections and the embedded SQLite backend.
//!
//! # Responsibility
//! - Define the connection seam used by the persistence call.
//! - Open and configure SQLite connections and apply local migrations.
//! - Guarantee connection release through [`ConnectionGuard`].
//!
//! # Invariants
//! - A connection handed out by a [`Connector`] is released exactly once.
//! - Core code must not write application data before migrations succeed.

use crate::config::DbConfig;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod guard;
pub mod migrations;
mod open;

pub use guard::ConnectionGuard;
pub use open::{open_db, open_db_in_memory, SqliteConnection, SqliteConnector};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The guard already released its connection.
    ConnectionClosed,
    /// Failure reported by a non-SQLite connector.
    Backend(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ConnectionClosed => write!(f, "connection already closed"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::ConnectionClosed | Self::Backend(_) => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// One positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&BindValue> for rusqlite::types::Value {
    fn from(value: &BindValue) -> Self {
        match value {
            BindValue::Null => Self::Null,
            BindValue::Integer(number) => Self::Integer(*number),
            BindValue::Real(number) => Self::Real(*number),
            BindValue::Text(text) => Self::Text(text.clone()),
        }
    }
}

/// A single open connection able to run parameterized statements.
pub trait StoreConnection {
    /// Executes `sql`, binding `values` to its `?` placeholders by position.
    /// Returns the number of affected rows.
    fn execute(&mut self, sql: &str, values: &[BindValue]) -> DbResult<usize>;

    /// Releases the connection.
    fn close(self) -> DbResult<()>
    where
        Self: Sized;
}

/// Opens connections from a static configuration.
pub trait Connector {
    type Connection: StoreConnection;

    fn connect(&self, config: &DbConfig) -> DbResult<Self::Connection>;
}
