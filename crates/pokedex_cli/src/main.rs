//! CLI entry point running the save flow for one record.
//!
//! # Responsibility
//! - Construct the canonical record, serialize it and persist it once.
//! - Report the outcome on stdout and failures through core logging.

use log::error;
use pokedex_core::{
    default_log_level, init_console_logging, to_interchange, DbConfig, PersistService, Pokemon,
    SqliteConnector,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_console_logging(default_log_level()) {
        eprintln!("logging disabled: {err}");
    }

    let pikachu = match Pokemon::try_new("Pikachu", "Electric", 10) {
        Ok(pokemon) => pokemon,
        Err(err) => {
            error!("event=cli_run module=cli status=error error_code=invalid_record error={err}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", pikachu.info());

    let payload = match to_interchange(&pikachu) {
        Ok(payload) => payload,
        Err(err) => {
            error!("event=cli_run module=cli status=error error_code=serialize_failed error={err}");
            return ExitCode::FAILURE;
        }
    };

    let service = PersistService::new(SqliteConnector, DbConfig::default());
    match service.save_json(&payload) {
        Ok(report) => {
            println!(
                "saved rows={} database={}",
                report.rows_affected,
                service.config().database
            );
            ExitCode::SUCCESS
        }
        // Already logged by the service.
        Err(_) => ExitCode::FAILURE,
    }
}
