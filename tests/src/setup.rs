use crate::{ExecLog, LoggingConnection};

use crudkit::{sqlite::Sqlite, Action, CrudCommand, CrudConfig, Persistence, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Tables every test database starts with.
const SCHEMA: &str = "
    CREATE TABLE user_account (
        id INTEGER PRIMARY KEY,
        email VARCHAR(64),
        status VARCHAR(16) NOT NULL,
        age INTEGER,
        joined_on DATE
    );

    CREATE TABLE person (
        id INTEGER PRIMARY KEY,
        name VARCHAR(32) NOT NULL
    );

    CREATE TABLE employee (
        id INTEGER PRIMARY KEY REFERENCES person(id),
        salary INTEGER,
        status_code SMALLINT
    );
";

static NEXT_PREFIX: AtomicUsize = AtomicUsize::new(0);

/// A fresh in-memory database with its own model namespace, so compiled
/// models are never shared between tests.
pub struct Setup {
    conn: LoggingConnection,
    config: CrudConfig,
}

impl Setup {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let conn = Sqlite::in_memory().connect().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let prefix = format!("test_{}", NEXT_PREFIX.fetch_add(1, Ordering::Relaxed));
        Self {
            conn: LoggingConnection::new(conn),
            config: CrudConfig::new().prefix(prefix),
        }
    }

    pub fn conn(&self) -> &LoggingConnection {
        &self.conn
    }

    pub fn config(&self) -> &CrudConfig {
        &self.config
    }

    /// Statements executed so far
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.conn.ops_log_handle())
    }

    /// Run setup SQL directly, bypassing the log
    pub fn execute(&self, sql: &str) {
        self.conn.sqlite().execute_batch(sql).unwrap();
    }

    #[track_caller]
    pub fn command(&self, tables: &str, action: Action) -> CrudCommand {
        CrudCommand::new(&self.conn, &self.config, tables, action).unwrap()
    }

    /// Compile and register each `(name, tables, action)` entry.
    pub fn persistence<'a>(
        &self,
        commands: impl IntoIterator<Item = (&'a str, &'a str, Action)>,
    ) -> Persistence {
        let mut registry = Registry::new();
        for (name, tables, action) in commands {
            registry.register_command(name, &self.command(tables, action));
        }
        Persistence::new(registry)
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}
