//! Core record contract for pokedex.
//! This crate owns record validation, JSON interchange and single-row persistence.

pub mod config;
pub mod db;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DbConfig, InsertTarget};
pub use db::{
    BindValue, ConnectionGuard, Connector, DbError, DbResult, SqliteConnection, SqliteConnector,
    StoreConnection,
};
pub use interchange::{
    parse_interchange, to_interchange, InterchangeError, InterchangePayload, InterchangeResult,
};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use model::pokemon::{Pokemon, PokemonField, PokemonValidationError, ValueType};
pub use repo::pokemon_repo::InsertStatement;
pub use service::persist_service::{
    PersistError, PersistResult, PersistService, SavePhase, SaveReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
