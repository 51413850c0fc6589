use super::{Column, ImportedKey, Schema, Table};

/// Builds an in-memory [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    tables: Vec<Table>,
}

/// Builds one table of an in-memory [`Schema`].
#[derive(Debug)]
pub struct TableBuilder {
    table: Table,
}

impl Builder {
    pub fn table(mut self, table: TableBuilder) -> Self {
        self.tables.push(table.table);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            tables: self.tables,
        }
    }
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: Table {
                name: name.into(),
                columns: vec![],
                primary_key: vec![],
                imported_keys: vec![],
            },
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.table.columns.push(column);
        self
    }

    /// Marks the named columns as the primary key. Key columns are not null.
    pub fn primary_key<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Self {
        for name in columns {
            if let Some(column) = self.table.columns.iter_mut().find(|c| c.name == name) {
                column.nullable = false;
            }
            self.table.primary_key.push(name.to_string());
        }
        self
    }

    pub fn references(mut self, column: &str, table: &str) -> Self {
        self.table
            .imported_keys
            .push(ImportedKey::new(column, table));
        self
    }
}
