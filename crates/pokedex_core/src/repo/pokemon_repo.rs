//! Pokemon insert statement and positional binding.
//!
//! # Responsibility
//! - Render the single parameterized insert for an [`InsertTarget`].
//! - Order bound values to match the declared column order.
//!
//! # Invariants
//! - Bound values are always `[name, type, level]`, matching the columns.
//! - Statement text never contains user values, only `?` placeholders.

use crate::config::InsertTarget;
use crate::db::{BindValue, ConnectionGuard, DbResult, StoreConnection};
use crate::interchange::InterchangePayload;
use serde_json::Number;

/// A rendered insert plus its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub values: [BindValue; 3],
}

impl InsertStatement {
    pub fn for_payload(target: &InsertTarget, payload: &InterchangePayload) -> Self {
        Self {
            sql: insert_sql(target),
            values: bind_values(payload),
        }
    }
}

/// Renders `INSERT INTO <table> (<c1>, <c2>, <c3>) VALUES (?, ?, ?)`.
pub fn insert_sql(target: &InsertTarget) -> String {
    let [name, kind, level] = target.columns();
    format!(
        "INSERT INTO {} ({name}, {kind}, {level}) VALUES (?, ?, ?)",
        target.table()
    )
}

/// Values in column order; unset fields bind as SQL `NULL`.
pub fn bind_values(payload: &InterchangePayload) -> [BindValue; 3] {
    [
        text_value(payload.name.as_deref()),
        text_value(payload.kind.as_deref()),
        payload.level.as_ref().map_or(BindValue::Null, number_value),
    ]
}

/// Runs the insert on an already acquired connection.
pub fn insert_pokemon<C: StoreConnection>(
    conn: &mut ConnectionGuard<C>,
    statement: &InsertStatement,
) -> DbResult<usize> {
    conn.execute(&statement.sql, &statement.values)
}

fn text_value(value: Option<&str>) -> BindValue {
    value.map_or(BindValue::Null, |text| BindValue::Text(text.to_string()))
}

fn number_value(number: &Number) -> BindValue {
    if let Some(integer) = number.as_i64() {
        return BindValue::Integer(integer);
    }
    // u64 above i64::MAX and fractional levels fall back to REAL.
    number
        .as_f64()
        .map_or(BindValue::Null, BindValue::Real)
}
