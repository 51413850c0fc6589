mod batch;
pub use batch::{affected_row_count, BatchResult};

mod cursor;
pub use cursor::{ColumnMeta, Cursor};

use crate::{schema::SqlType, stmt::Value, Result};

/// A live database connection.
///
/// crudkit never opens, pools or commits connections; the caller hands one in
/// for every execution and owns its transaction discipline.
pub trait Connection {
    /// Prepares `sql`, which uses `?` positional placeholders.
    fn prepare<'c>(&'c self, sql: &str) -> Result<Box<dyn Statement + 'c>>;
}

/// A prepared statement.
///
/// The driver releases the underlying handle when the statement is dropped,
/// so every exit path of an execution, including early returns on error,
/// frees it.
pub trait Statement {
    /// Binds `value` to the 1-based placeholder `index`, declared as `ty`.
    fn set(&mut self, index: usize, value: Value, ty: SqlType) -> Result<()>;

    /// Binds SQL NULL to the 1-based placeholder `index`.
    fn set_null(&mut self, index: usize, ty: SqlType) -> Result<()>;

    /// Records the current bindings as one entry of a batch.
    fn add_batch(&mut self) -> Result<()>;

    /// Executes with the current bindings and returns the affected row count.
    fn execute_update(&mut self) -> Result<u64>;

    /// Executes every recorded batch entry. A failure of the underlying
    /// driver fails the whole batch.
    fn execute_batch(&mut self) -> Result<Vec<BatchResult>>;

    /// Executes with the current bindings and returns the result cursor.
    fn execute_query(&mut self) -> Result<Box<dyn Cursor + '_>>;

    /// Keys generated by the last `execute_update`, one per inserted row.
    fn generated_keys(&mut self) -> Result<Vec<i64>>;
}
