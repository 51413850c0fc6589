use super::{Column, ImportedKey, SchemaProbe};
use crate::Result;

/// A table descriptor assembled from catalog metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns, in declaration order
    pub columns: Vec<Column>,

    /// Names of the primary key columns
    pub primary_key: Vec<String>,

    /// Foreign keys of the table
    pub imported_keys: Vec<ImportedKey>,
}

impl Table {
    /// Reads the descriptor of `name` through `probe`.
    pub fn probe(probe: &dyn SchemaProbe, name: &str) -> Result<Self> {
        let columns = probe.columns_of(name)?;
        log::trace!("probed table {name}; columns={}", columns.len());

        Ok(Self {
            name: name.to_string(),
            columns,
            primary_key: probe.primary_keys_of(name)?,
            imported_keys: probe.imported_keys_of(name)?,
        })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.iter().any(|key| key == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns
            .iter()
            .filter(|column| self.is_primary_key(&column.name))
    }
}
