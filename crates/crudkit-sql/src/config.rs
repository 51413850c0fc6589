use crudkit_core::{Error, Result};

use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde::Deserialize;

/// Configuration for statement compilation
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrudConfig {
    /// Namespace of the compiled models; part of the model cache key
    pub prefix: String,

    /// Per-table overrides of derived field names: table, then column, to
    /// field name
    pub aliases: IndexMap<String, IndexMap<String, String>>,
}

impl CrudConfig {
    /// Create a new CrudConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from TOML text
    pub fn from_toml(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|err| Error::configuration(err.to_string()))
    }

    /// Set the model namespace
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Map `column` of `table` to the field name `field`
    pub fn alias(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.aliases
            .entry(table.into())
            .or_default()
            .insert(column.into(), field.into());
        self
    }

    /// The field name bound to `column` of `table`: the alias when one is
    /// configured, otherwise the lower camel case column name.
    pub fn field_name(&self, table: &str, column: &str) -> String {
        self.aliases
            .get(table)
            .and_then(|aliases| aliases.get(column))
            .cloned()
            .unwrap_or_else(|| column.to_lower_camel_case())
    }

    pub(crate) fn aliases_of(&self, table: &str) -> Vec<(String, String)> {
        self.aliases
            .get(table)
            .map(|aliases| {
                aliases
                    .iter()
                    .map(|(column, field)| (column.clone(), field.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
