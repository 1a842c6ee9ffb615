//! Scoped connection ownership.
//!
//! # Invariants
//! - The wrapped connection is closed exactly once: by
//!   [`ConnectionGuard::release`] or, failing that, on drop.
//! - Statements after release fail with [`DbError::ConnectionClosed`].
//! - Close failures during drop are logged, never panicked on.

use super::{BindValue, DbError, DbResult, StoreConnection};
use log::{debug, error};

pub struct ConnectionGuard<C: StoreConnection> {
    conn: Option<C>,
}

impl<C: StoreConnection> ConnectionGuard<C> {
    pub fn new(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    pub fn execute(&mut self, sql: &str, values: &[BindValue]) -> DbResult<usize> {
        match self.conn.as_mut() {
            Some(conn) => conn.execute(sql, values),
            None => Err(DbError::ConnectionClosed),
        }
    }

    /// Closes the connection now and reports the close result.
    ///
    /// Releasing an already released guard is a no-op.
    pub fn release(&mut self) -> DbResult<()> {
        match self.conn.take() {
            Some(conn) => conn.close(),
            None => Ok(()),
        }
    }
}

impl<C: StoreConnection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        debug!("event=db_release module=db status=start trigger=drop");
        if let Err(err) = conn.close() {
            error!(
                "event=db_release module=db status=error trigger=drop error_code=close_failed error={}",
                err
            );
        }
    }
}
