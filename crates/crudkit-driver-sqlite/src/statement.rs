use crate::Value;

use crudkit_core::{
    driver::{self, BatchResult, ColumnMeta},
    stmt, Error, Result, SqlType,
};
use rusqlite::params_from_iter;

/// A prepared statement with its pending bindings.
pub(crate) struct Statement<'c> {
    connection: &'c rusqlite::Connection,
    stmt: rusqlite::Statement<'c>,

    /// `true` for INSERT statements, which report generated keys
    insert: bool,

    /// Current bindings, by placeholder position
    params: Vec<Value>,

    /// Bindings recorded by `add_batch`
    batch: Vec<Vec<Value>>,

    /// Keys generated by the last execution
    keys: Vec<i64>,
}

impl<'c> Statement<'c> {
    pub(crate) fn new(
        connection: &'c rusqlite::Connection,
        stmt: rusqlite::Statement<'c>,
        sql: &str,
    ) -> Self {
        let insert = sql
            .trim_start()
            .get(..6)
            .is_some_and(|verb| verb.eq_ignore_ascii_case("INSERT"));

        Self {
            connection,
            insert,
            params: vec![Value::from(stmt::Value::Null); stmt.parameter_count()],
            stmt,
            batch: vec![],
            keys: vec![],
        }
    }

    fn slot(&mut self, index: usize) -> Result<&mut Value> {
        let len = self.params.len();
        index
            .checked_sub(1)
            .and_then(|i| self.params.get_mut(i))
            .ok_or_else(|| {
                Error::driver(rusqlite::Error::InvalidParameterCount(index, len))
            })
    }

    fn run(&mut self, params: &[Value]) -> Result<u64> {
        let count = self
            .stmt
            .execute(params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        if self.insert && count > 0 {
            let last = self.connection.last_insert_rowid();
            let count = count as i64;
            self.keys.extend((last - count + 1)..=last);
        }

        Ok(count as u64)
    }
}

impl driver::Statement for Statement<'_> {
    fn set(&mut self, index: usize, value: stmt::Value, _ty: SqlType) -> Result<()> {
        *self.slot(index)? = Value::from(value);
        Ok(())
    }

    fn set_null(&mut self, index: usize, _ty: SqlType) -> Result<()> {
        *self.slot(index)? = Value::from(stmt::Value::Null);
        Ok(())
    }

    fn add_batch(&mut self) -> Result<()> {
        self.batch.push(self.params.clone());
        Ok(())
    }

    fn execute_update(&mut self) -> Result<u64> {
        self.keys.clear();
        let params = std::mem::take(&mut self.params);
        let result = self.run(&params);
        self.params = params;
        result
    }

    fn execute_batch(&mut self) -> Result<Vec<BatchResult>> {
        self.keys.clear();
        let batch = std::mem::take(&mut self.batch);
        batch
            .iter()
            .map(|params| self.run(params).map(BatchResult::Count))
            .collect()
    }

    fn execute_query(&mut self) -> Result<Box<dyn driver::Cursor + '_>> {
        let columns = self
            .stmt
            .columns()
            .iter()
            .map(|column| {
                let (ty, _) = SqlType::from_decl(column.decl_type().unwrap_or(""));
                ColumnMeta::new(column.name(), ty)
            })
            .collect();

        let rows = self
            .stmt
            .query(params_from_iter(self.params.iter()))
            .map_err(Error::driver)?;

        Ok(Box::new(Cursor { rows, columns }))
    }

    fn generated_keys(&mut self) -> Result<Vec<i64>> {
        Ok(self.keys.clone())
    }
}

struct Cursor<'s> {
    rows: rusqlite::Rows<'s>,
    columns: Vec<ColumnMeta>,
}

impl driver::Cursor for Cursor<'_> {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<stmt::Value>>> {
        let Some(row) = self.rows.next().map_err(Error::driver)? else {
            return Ok(None);
        };

        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| Value::from_sql(row, index, column.ty).map(Value::into_inner))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
