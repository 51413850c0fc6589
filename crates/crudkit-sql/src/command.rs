use crate::{
    cache, Action, CompiledStatement, CrudConfig, CrudModel, Operation, ParamDescriptor,
    StatementGroup,
};

use crudkit_core::{DataObject, Result, SchemaProbe};
use std::sync::Arc;

/// A table of an action's table list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: String,

    /// RETRIEVE and SEARCH select `name.*` of dominant tables only
    pub dominant: bool,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dominant: false,
        }
    }

    pub fn dominant(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dominant: true,
        }
    }

    /// Parses a comma separated table list. A leading `*` marks a table
    /// dominant.
    pub fn parse_list(src: &str) -> Vec<Self> {
        src.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.strip_prefix('*') {
                Some(name) => Self::dominant(name.trim_start()),
                None => Self::new(token),
            })
            .collect()
    }
}

/// A named, compiled action.
///
/// Construction compiles the action against the schema, or reuses the model
/// compiled earlier for an equal action.
#[derive(Debug, Clone)]
pub struct CrudCommand {
    name: String,
    action: Action,
    tables: Vec<TableRef>,
    model: Arc<CrudModel>,
}

impl CrudCommand {
    /// Compiles `action` over the comma separated `tables`, for example
    /// `"*person, employee"`.
    pub fn new(
        probe: &dyn SchemaProbe,
        config: &CrudConfig,
        tables: &str,
        action: Action,
    ) -> Result<Self> {
        Self::with_tables(probe, config, TableRef::parse_list(tables), action)
    }

    pub fn with_tables(
        probe: &dyn SchemaProbe,
        config: &CrudConfig,
        tables: Vec<TableRef>,
        action: Action,
    ) -> Result<Self> {
        let key = cache::CacheKey::new(config, &tables, &action);
        let model = cache::get_or_compile(key, || {
            CrudModel::compile(probe, config, &tables, &action)
        })?;

        Ok(Self {
            name: model.descriptor().name().to_string(),
            action,
            tables,
            model,
        })
    }

    /// The model name, derived from the last table.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operation(&self) -> Operation {
        self.action.op()
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn tables(&self) -> &[TableRef] {
        &self.tables
    }

    pub fn description(&self) -> String {
        let tables: Vec<_> = self.tables.iter().map(|table| table.name.as_str()).collect();
        format!("{} >> {}", self.action, tables.join(", "))
    }

    pub fn model(&self) -> &Arc<CrudModel> {
        &self.model
    }

    pub fn descriptor(&self) -> &ParamDescriptor {
        self.model.descriptor()
    }

    pub fn statements(&self) -> &Arc<StatementGroup> {
        self.model.group()
    }

    /// The SEARCH variant index for `obj`, see [`StatementGroup::choose`].
    pub fn choose(&self, obj: &dyn DataObject) -> usize {
        self.model.group().choose(obj)
    }

    /// The statement to execute for `obj`.
    pub fn statement_for(&self, obj: &dyn DataObject) -> Result<&Arc<CompiledStatement>> {
        self.model.group().select(obj)
    }
}
