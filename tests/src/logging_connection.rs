use crudkit::{
    driver::{self, BatchResult},
    schema::{Column, ImportedKey},
    sqlite, Connection, Cursor, Result, SchemaProbe, SqlType, Value,
};
use std::sync::{Arc, Mutex};

/// A connection wrapper that logs the SQL of every prepared statement and
/// the values bound to it.
#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes statements
    inner: sqlite::Connection,

    /// Log of all statements executed through this connection
    ops_log: Arc<Mutex<Vec<StatementOp>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementOp {
    pub sql: String,

    /// One entry per execution or batch entry
    pub bindings: Vec<Vec<Value>>,
}

struct LoggingStatement<'c> {
    inner: Box<dyn driver::Statement + 'c>,
    ops_log: Arc<Mutex<Vec<StatementOp>>>,
    sql: String,
    current: Vec<Value>,
    batch: Vec<Vec<Value>>,
}

impl LoggingConnection {
    pub fn new(inner: sqlite::Connection) -> Self {
        Self {
            inner,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sqlite(&self) -> &sqlite::Connection {
        &self.inner
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<StatementOp>>> {
        self.ops_log.clone()
    }
}

impl Connection for LoggingConnection {
    fn prepare<'c>(&'c self, sql: &str) -> Result<Box<dyn driver::Statement + 'c>> {
        Ok(Box::new(LoggingStatement {
            inner: self.inner.prepare(sql)?,
            ops_log: self.ops_log.clone(),
            sql: sql.to_string(),
            current: vec![],
            batch: vec![],
        }))
    }
}

impl SchemaProbe for LoggingConnection {
    fn columns_of(&self, table: &str) -> Result<Vec<Column>> {
        self.inner.columns_of(table)
    }

    fn primary_keys_of(&self, table: &str) -> Result<Vec<String>> {
        self.inner.primary_keys_of(table)
    }

    fn imported_keys_of(&self, table: &str) -> Result<Vec<ImportedKey>> {
        self.inner.imported_keys_of(table)
    }
}

impl LoggingStatement<'_> {
    fn record(&mut self, index: usize, value: Value) {
        if self.current.len() < index {
            self.current.resize(index, Value::Null);
        }
        self.current[index - 1] = value;
    }

    fn log(&self, bindings: Vec<Vec<Value>>) {
        let op = StatementOp {
            sql: self.sql.clone(),
            bindings,
        };
        self.ops_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(op);
    }
}

impl driver::Statement for LoggingStatement<'_> {
    fn set(&mut self, index: usize, value: Value, ty: SqlType) -> Result<()> {
        self.record(index, value.clone());
        self.inner.set(index, value, ty)
    }

    fn set_null(&mut self, index: usize, ty: SqlType) -> Result<()> {
        self.record(index, Value::Null);
        self.inner.set_null(index, ty)
    }

    fn add_batch(&mut self) -> Result<()> {
        self.batch.push(std::mem::take(&mut self.current));
        self.inner.add_batch()
    }

    fn execute_update(&mut self) -> Result<u64> {
        self.log(vec![self.current.clone()]);
        self.inner.execute_update()
    }

    fn execute_batch(&mut self) -> Result<Vec<BatchResult>> {
        let batch = std::mem::take(&mut self.batch);
        self.log(batch);
        self.inner.execute_batch()
    }

    fn execute_query(&mut self) -> Result<Box<dyn Cursor + '_>> {
        self.log(vec![self.current.clone()]);
        self.inner.execute_query()
    }

    fn generated_keys(&mut self) -> Result<Vec<i64>> {
        self.inner.generated_keys()
    }
}
