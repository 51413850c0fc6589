mod probe;

mod statement;
use statement::Statement;

mod value;
pub(crate) use value::Value;

use crudkit_core::{driver, Error, Result};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

/// Location of a SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Parses a `sqlite:` connection URL; `sqlite::memory:` selects an
    /// in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

/// A SQLite connection. It implements both statement execution and catalog
/// metadata reads.
#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    /// Runs one or more `;` separated statements without parameters, such
    /// as schema setup.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        log::debug!("execute batch; sql={sql}");
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    pub fn inner(&self) -> &RusqliteConnection {
        &self.connection
    }
}

impl From<RusqliteConnection> for Connection {
    fn from(connection: RusqliteConnection) -> Self {
        Self { connection }
    }
}

impl driver::Connection for Connection {
    fn prepare<'c>(&'c self, sql: &str) -> Result<Box<dyn driver::Statement + 'c>> {
        let stmt = self.connection.prepare(sql).map_err(Error::driver)?;
        Ok(Box::new(Statement::new(&self.connection, stmt, sql)))
    }
}
