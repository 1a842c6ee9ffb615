//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and apply migrations before use.
//! - Adapt SQLite connections to the [`Connector`] seam.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - The password from [`DbConfig`] is never logged.

use super::migrations::apply_migrations;
use super::{BindValue, Connector, DbError, DbResult, StoreConnection};
use crate::config::DbConfig;
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

/// Opens one SQLite connection per call from [`DbConfig::database`].
///
/// `host`, `user`, `password` and `port` do not apply to an embedded store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl Connector for SqliteConnector {
    type Connection = SqliteConnection;

    fn connect(&self, config: &DbConfig) -> DbResult<Self::Connection> {
        debug!(
            "event=db_connect module=db status=start database={} host={} port={} user={}",
            config.database, config.host, config.port, config.user
        );
        let conn = if config.is_in_memory() {
            open_db_in_memory()?
        } else {
            open_db(&config.database)?
        };
        Ok(SqliteConnection { conn })
    }
}

/// SQLite connection adapted to [`StoreConnection`].
pub struct SqliteConnection {
    conn: Connection,
}

impl StoreConnection for SqliteConnection {
    fn execute(&mut self, sql: &str, values: &[BindValue]) -> DbResult<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let changed = stmt.execute(params_from_iter(values.iter().map(Value::from)))?;
        Ok(changed)
    }

    fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| DbError::Sqlite(err))
    }
}
