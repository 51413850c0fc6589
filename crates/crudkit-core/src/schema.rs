mod builder;
pub use builder::{Builder, TableBuilder};

mod column;
pub use column::{Column, ImportedKey};

mod sql_type;
pub use sql_type::SqlType;

mod table;
pub use table::Table;

use crate::Result;

/// Reads catalog metadata for a named table.
///
/// Drivers implement this over their catalog queries; [`Schema`] implements it
/// over an in-memory description.
pub trait SchemaProbe {
    /// The table's columns in declaration order.
    fn columns_of(&self, table: &str) -> Result<Vec<Column>>;

    /// Names of the table's primary key columns.
    fn primary_keys_of(&self, table: &str) -> Result<Vec<String>>;

    /// The table's foreign keys.
    fn imported_keys_of(&self, table: &str) -> Result<Vec<ImportedKey>>;
}

/// An in-memory schema, used where no live catalog is at hand.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    fn expect_table(&self, name: &str) -> Result<&Table> {
        self.table(name)
            .ok_or_else(|| crate::Error::configuration(format!("table {name} does not exist")))
    }
}

impl SchemaProbe for Schema {
    fn columns_of(&self, table: &str) -> Result<Vec<Column>> {
        Ok(self.expect_table(table)?.columns.clone())
    }

    fn primary_keys_of(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.expect_table(table)?.primary_key.clone())
    }

    fn imported_keys_of(&self, table: &str) -> Result<Vec<ImportedKey>> {
        Ok(self.expect_table(table)?.imported_keys.clone())
    }
}
