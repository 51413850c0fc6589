use crate::{CompiledStatement, CrudCommand, Error, Result, StatementGroup};

use std::{collections::HashMap, sync::Arc};

/// Maps logical statement names to compiled statement groups.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    groups: HashMap<String, Arc<StatementGroup>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `group` under `name`, replacing any earlier entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        group: impl Into<Arc<StatementGroup>>,
    ) -> &mut Self {
        let name = name.into();
        let group = group.into();
        log::debug!(
            "registered statement; name={name} kind={:?} statements={}",
            group.kind(),
            group.len()
        );
        self.groups.insert(name, group);
        self
    }

    /// Registers the statements of a compiled command.
    pub fn register_command(&mut self, name: impl Into<String>, command: &CrudCommand) -> &mut Self {
        self.register(name, command.statements().clone())
    }

    /// Registers a hand-written statement that modifies rows.
    pub fn register_update(&mut self, name: impl Into<String>, statement: CompiledStatement) -> &mut Self {
        self.register(name, StatementGroup::update(statement))
    }

    /// Registers a hand-written query.
    pub fn register_query(&mut self, name: impl Into<String>, statement: CompiledStatement) -> &mut Self {
        self.register(name, StatementGroup::query(statement))
    }

    pub fn get(&self, name: &str) -> Result<&Arc<StatementGroup>> {
        self.groups
            .get(name)
            .ok_or_else(|| Error::statement_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }
}
