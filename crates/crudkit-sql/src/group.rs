use crate::CompiledStatement;

use crudkit_core::{DataObject, Error, Result};
use std::sync::Arc;

/// Whether a group's statements modify rows or return a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Update,
    Query,
}

/// The statements produced for one action.
///
/// A mutating action yields one statement per table, RETRIEVE yields one and
/// SEARCH yields `2^k` variants over its `k` optional filters. Variant `i`
/// contains the filter of optional `j` exactly when bit `j` of `i` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementGroup {
    kind: StatementKind,
    statements: Vec<Arc<CompiledStatement>>,

    /// Field names of the optional filters, in bit order
    optionals: Vec<String>,
}

impl StatementGroup {
    pub fn new(kind: StatementKind, statements: Vec<CompiledStatement>) -> Self {
        Self {
            kind,
            statements: statements.into_iter().map(Arc::new).collect(),
            optionals: vec![],
        }
    }

    /// A single update statement.
    pub fn update(statement: CompiledStatement) -> Self {
        Self::new(StatementKind::Update, vec![statement])
    }

    /// A single query.
    pub fn query(statement: CompiledStatement) -> Self {
        Self::new(StatementKind::Query, vec![statement])
    }

    /// A SEARCH variant group. `statements` must hold one variant per subset
    /// of `optionals`.
    pub fn variants(statements: Vec<CompiledStatement>, optionals: Vec<String>) -> Result<Self> {
        let expected = 1usize.checked_shl(optionals.len() as u32);

        if expected != Some(statements.len()) {
            return Err(Error::configuration(format!(
                "{} optional filters need 2^{} variants; found {}",
                optionals.len(),
                optionals.len(),
                statements.len()
            )));
        }

        Ok(Self {
            optionals,
            ..Self::new(StatementKind::Query, statements)
        })
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn is_query(&self) -> bool {
        self.kind == StatementKind::Query
    }

    pub fn statements(&self) -> &[Arc<CompiledStatement>] {
        &self.statements
    }

    pub fn get(&self, index: usize) -> Option<&Arc<CompiledStatement>> {
        self.statements.get(index)
    }

    pub fn first(&self) -> Option<&Arc<CompiledStatement>> {
        self.statements.first()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn optionals(&self) -> &[String] {
        &self.optionals
    }

    /// The variant index for `obj`: bit `j` is set when optional filter `j`
    /// holds a value that is neither null nor an empty string.
    pub fn choose(&self, obj: &dyn DataObject) -> usize {
        self.optionals
            .iter()
            .enumerate()
            .filter(|(_, name)| obj.get(name).is_some_and(|value| !value.is_blank()))
            .fold(0, |index, (bit, _)| index | (1 << bit))
    }

    /// The statement [`choose`](Self::choose) selects for `obj`.
    pub fn select(&self, obj: &dyn DataObject) -> Result<&Arc<CompiledStatement>> {
        let index = self.choose(obj);
        self.statements.get(index).ok_or_else(|| {
            Error::invalid_result(format!(
                "variant {index} out of range; group has {} statements",
                self.statements.len()
            ))
        })
    }
}
