//! Single-record persistence use case.
//!
//! # Responsibility
//! - Run acquire → parse → execute → release for one interchange payload.
//! - Log every failure at the step where it happens.
//!
//! # Invariants
//! - At most one connection is opened per call, and only for a valid config.
//! - No statement is issued when the connection cannot be acquired.
//! - The connection is released on every path once acquired.

use crate::config::{ConfigError, DbConfig, InsertTarget};
use crate::db::{BindValue, ConnectionGuard, Connector, DbError, StoreConnection};
use crate::interchange::{parse_interchange, to_interchange, InterchangeError};
use crate::model::pokemon::Pokemon;
use crate::repo::pokemon_repo::{insert_pokemon, InsertStatement};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Config(ConfigError),
    Connect(DbError),
    Interchange(InterchangeError),
    Query(DbError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid connection config: {err}"),
            Self::Connect(err) => write!(f, "connection failed: {err}"),
            Self::Interchange(err) => write!(f, "{err}"),
            Self::Query(err) => write!(f, "insert failed: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Connect(err) | Self::Query(err) => Some(err),
            Self::Interchange(err) => Some(err),
        }
    }
}

impl From<InterchangeError> for PersistError {
    fn from(value: InterchangeError) -> Self {
        Self::Interchange(value)
    }
}

/// Connection lifecycle phases, logged as `phase=<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    Idle,
    Connecting,
    Connected,
    Querying,
    Queried,
    QueryFailed,
    Closing,
    Closed,
}

impl SavePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Querying => "querying",
            Self::Queried => "queried",
            Self::QueryFailed => "query_failed",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub rows_affected: usize,
    /// Values bound to the insert, in placeholder order.
    pub values: [BindValue; 3],
}

/// Persists interchange payloads through one connector.
pub struct PersistService<K: Connector> {
    connector: K,
    config: DbConfig,
    target: InsertTarget,
}

impl<K: Connector> PersistService<K> {
    /// Creates a service inserting into the default `pokemon` table.
    pub fn new(connector: K, config: DbConfig) -> Self {
        Self::with_target(connector, config, InsertTarget::default())
    }

    pub fn with_target(connector: K, config: DbConfig, target: InsertTarget) -> Self {
        Self {
            connector,
            config,
            target,
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Serializes `pokemon` and saves the resulting interchange text.
    pub fn save_pokemon(&self, pokemon: &Pokemon) -> PersistResult<SaveReport> {
        let payload = to_interchange(pokemon)?;
        self.save_json(&payload)
    }

    /// Saves one interchange payload with a single insert.
    ///
    /// # Errors
    /// - `Config` when the connection config fails validation; nothing is opened.
    /// - `Connect` when the connection cannot be opened; nothing is executed.
    /// - `Interchange` when the payload is not a valid interchange object.
    /// - `Query` when the insert fails.
    pub fn save_json(&self, payload: &str) -> PersistResult<SaveReport> {
        let started_at = Instant::now();
        trace_phase(SavePhase::Idle);

        if let Err(err) = self.config.validate() {
            error!(
                "event=pokemon_save module=service status=error error_code=config_invalid error={}",
                err
            );
            return Err(PersistError::Config(err));
        }

        trace_phase(SavePhase::Connecting);
        let conn = match self.connector.connect(&self.config) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=pokemon_save module=service status=error duration_ms={} error_code=connect_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(PersistError::Connect(err));
            }
        };
        let mut guard = ConnectionGuard::new(conn);
        trace_phase(SavePhase::Connected);
        info!(
            "event=pokemon_save module=service status=connected database={} port={}",
            self.config.database, self.config.port
        );

        let parsed = match parse_interchange(payload) {
            Ok(parsed) => parsed,
            Err(err) => {
                error!(
                    "event=pokemon_save module=service status=error duration_ms={} error_code=payload_invalid error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                release_connection(&mut guard);
                return Err(err.into());
            }
        };

        let statement = InsertStatement::for_payload(&self.target, &parsed);
        trace_phase(SavePhase::Querying);
        let rows_affected = match insert_pokemon(&mut guard, &statement) {
            Ok(rows) => rows,
            Err(err) => {
                trace_phase(SavePhase::QueryFailed);
                error!(
                    "event=pokemon_save module=service status=error duration_ms={} error_code=query_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                release_connection(&mut guard);
                return Err(PersistError::Query(err));
            }
        };
        trace_phase(SavePhase::Queried);
        release_connection(&mut guard);

        info!(
            "event=pokemon_save module=service status=ok duration_ms={} rows_affected={}",
            started_at.elapsed().as_millis(),
            rows_affected
        );
        Ok(SaveReport {
            rows_affected,
            values: statement.values,
        })
    }
}

/// Walks `closing → closed`. A close failure is logged and does not fail the save.
fn release_connection<C: StoreConnection>(guard: &mut ConnectionGuard<C>) {
    trace_phase(SavePhase::Closing);
    if let Err(err) = guard.release() {
        warn!(
            "event=pokemon_save module=service status=warn error_code=close_failed error={}",
            err
        );
    }
    trace_phase(SavePhase::Closed);
}

fn trace_phase(phase: SavePhase) {
    debug!(
        "event=pokemon_save module=service phase={}",
        phase.as_str()
    );
}
