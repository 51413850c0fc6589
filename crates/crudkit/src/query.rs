mod mapped;
pub use mapped::{MappedRows, ObjectMappedQuery};

use crate::{CompiledStatement, Connection, Cursor, DataObject, ParametricStatement, Result};

use std::sync::Arc;

/// Consumes the cursor of an executed query.
pub trait ResultSetWorker<T> {
    fn process(&mut self, cursor: &mut dyn Cursor) -> Result<T>;
}

impl<T, F> ResultSetWorker<T> for F
where
    F: FnMut(&mut dyn Cursor) -> Result<T>,
{
    fn process(&mut self, cursor: &mut dyn Cursor) -> Result<T> {
        self(cursor)
    }
}

/// A parametric statement whose execution hands the result cursor to a
/// worker.
#[derive(Debug, Clone)]
pub struct ParametricQuery {
    statement: ParametricStatement,
}

impl ParametricQuery {
    pub fn new(statement: Arc<CompiledStatement>) -> Self {
        Self {
            statement: ParametricStatement::new(statement),
        }
    }

    pub fn parse(params: &str, sql: &str) -> Result<Self> {
        Ok(Self {
            statement: ParametricStatement::parse(params, sql)?,
        })
    }

    pub fn statement(&self) -> &ParametricStatement {
        &self.statement
    }

    /// Executes with parameters bound from `obj` and passes the cursor to
    /// `worker`. The cursor and statement are closed when this returns.
    pub fn execute_select<T>(
        &self,
        conn: &dyn Connection,
        obj: &dyn DataObject,
        mut worker: impl ResultSetWorker<T>,
    ) -> Result<T> {
        let statement = &self.statement;

        statement.run(|| {
            let mut stmt = conn.prepare(statement.sql())?;
            statement.bind(&mut *stmt, obj)?;
            let mut cursor = stmt.execute_query()?;
            worker.process(&mut *cursor)
        })
    }
}
