use log::{LevelFilter, Log, Metadata, Record};
use pokedex_core::{
    BindValue, Connector, DbConfig, DbError, DbResult, PersistService, StoreConnection,
};
use std::sync::Mutex;

/// Keeps the `phase=` field of every save trace line.
struct PhaseCapture {
    phases: Mutex<Vec<String>>,
}

impl Log for PhaseCapture {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let line = record.args().to_string();
        if let Some(phase) = line.split(' ').find_map(|field| field.strip_prefix("phase=")) {
            self.phases.lock().unwrap().push(phase.to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: PhaseCapture = PhaseCapture {
    phases: Mutex::new(Vec::new()),
};

struct FlakyConnector {
    fail_execute: bool,
}

struct FlakyConnection {
    fail_execute: bool,
}

impl Connector for FlakyConnector {
    type Connection = FlakyConnection;

    fn connect(&self, _config: &DbConfig) -> DbResult<Self::Connection> {
        Ok(FlakyConnection {
            fail_execute: self.fail_execute,
        })
    }
}

impl StoreConnection for FlakyConnection {
    fn execute(&mut self, _sql: &str, _values: &[BindValue]) -> DbResult<usize> {
        if self.fail_execute {
            return Err(DbError::Backend("disk full".to_string()));
        }
        Ok(1)
    }

    fn close(self) -> DbResult<()> {
        Ok(())
    }
}

fn take_phases() -> Vec<String> {
    std::mem::take(&mut *CAPTURE.phases.lock().unwrap())
}

// Single test: the captured log is process-global.
#[test]
fn every_exit_path_walks_closing_then_closed() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Debug);
    let payload = r#"{"name":"Pika","type":"Electric","level":10}"#;

    let ok = PersistService::new(FlakyConnector { fail_execute: false }, DbConfig::in_memory());
    ok.save_json(payload).unwrap();
    assert_eq!(
        take_phases(),
        [
            "idle",
            "connecting",
            "connected",
            "querying",
            "queried",
            "closing",
            "closed"
        ]
    );

    let failing = PersistService::new(FlakyConnector { fail_execute: true }, DbConfig::in_memory());
    failing.save_json(payload).unwrap_err();
    assert_eq!(
        take_phases(),
        [
            "idle",
            "connecting",
            "connected",
            "querying",
            "query_failed",
            "closing",
            "closed"
        ]
    );

    failing.save_json("{").unwrap_err();
    assert_eq!(
        take_phases(),
        ["idle", "connecting", "connected", "closing", "closed"]
    );
}
