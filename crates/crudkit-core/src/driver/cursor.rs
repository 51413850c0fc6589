use crate::{schema::SqlType, stmt::Value, Result};

/// Name and declared type of a result column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub ty: SqlType,
}

/// A forward-only cursor over the rows of a query result.
///
/// The cursor is closed when dropped.
pub trait Cursor {
    /// The result columns, in select-list order.
    fn columns(&self) -> &[ColumnMeta];

    /// Advances to the next row, returning its values in column order.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>>;
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
