use crate::{
    query::ResultSetWorker, statement::row_count, CachedResultSet, Connection, DataObject, Error,
    Model, ObjectMappedQuery, ParametricQuery, ParametricStatement, Registry, Result,
    StatementGroup,
};

use crudkit_sql::{CompiledStatement, StatementKind};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

type MappedKey = (String, usize, TypeId);

/// Executes registered statements by name.
///
/// Every call receives the connection to run on; transactions are the
/// caller's concern. Object-mapped queries are created once per statement
/// variant and model type and reused.
#[derive(Debug)]
pub struct Persistence {
    registry: Registry,
    mapped: Mutex<HashMap<MappedKey, Arc<dyn Any + Send + Sync>>>,
}

impl Persistence {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            mapped: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Executes every statement of `name` in order with parameters bound
    /// from `obj`, returning the summed row count.
    pub fn execute_update(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
    ) -> Result<u64> {
        let group = self.group(name, StatementKind::Update)?;

        let mut count = 0;
        for statement in group.statements() {
            count += ParametricStatement::new(statement.clone()).execute_update(conn, obj)?;
        }
        Ok(count)
    }

    /// Executes every statement of `name` once per object, as one batch per
    /// statement, returning the summed row count.
    pub fn execute_update_batch<O: DataObject>(
        &self,
        conn: &dyn Connection,
        name: &str,
        objs: &[O],
    ) -> Result<u64> {
        let group = self.group(name, StatementKind::Update)?;

        let mut count = 0;
        for statement in group.statements() {
            count += ParametricStatement::new(statement.clone()).execute_update_batch(conn, objs)?;
        }
        Ok(count)
    }

    /// Executes the insert statements of `name`. With `want_keys` it
    /// returns the keys generated by the first statement; otherwise the row
    /// count of each statement.
    pub fn execute_insert(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
        want_keys: bool,
    ) -> Result<Vec<i64>> {
        let group = self.group(name, StatementKind::Update)?;
        let mut statements = group.statements().iter();

        let Some(first) = statements.next() else {
            return Ok(vec![]);
        };
        let mut out = ParametricStatement::new(first.clone()).execute_insert(conn, obj, want_keys)?;

        for statement in statements {
            let rows = ParametricStatement::new(statement.clone()).execute_update(conn, obj)?;
            if !want_keys {
                out.push(row_count(rows)?);
            }
        }
        Ok(out)
    }

    /// Executes the query variant of `name` that `obj` selects and hands the
    /// cursor to `worker`.
    pub fn execute_select<T>(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
        worker: impl ResultSetWorker<T>,
    ) -> Result<T> {
        let (_, statement) = self.variant(name, obj)?;
        ParametricQuery::new(statement.clone()).execute_select(conn, obj, worker)
    }

    /// Executes the query variant of `name` that `obj` selects and collects
    /// the rows as models.
    pub fn get_results<M: Model>(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
    ) -> Result<Vec<M>> {
        self.mapped::<M>(name, obj)?.results(conn, obj)
    }

    /// Like [`get_results`](Self::get_results), appending to `out` and
    /// returning the number of rows added.
    pub fn get_results_into<M: Model, C: Extend<M>>(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
        out: &mut C,
    ) -> Result<usize> {
        self.mapped::<M>(name, obj)?.results_into(conn, obj, out)
    }

    /// Executes the query variant of `name` that `obj` selects and captures
    /// the result.
    pub fn get_cached(
        &self,
        conn: &dyn Connection,
        name: &str,
        obj: &dyn DataObject,
    ) -> Result<CachedResultSet> {
        self.execute_select(conn, name, obj, CachedResultSet::builder())
    }

    fn group(&self, name: &str, kind: StatementKind) -> Result<&Arc<StatementGroup>> {
        let group = self.registry.get(name)?;
        if group.kind() != kind {
            return Err(Error::invalid_result(format!(
                "statement '{name}' is {:?}; expected {kind:?}",
                group.kind()
            )));
        }
        Ok(group)
    }

    fn variant(
        &self,
        name: &str,
        obj: &dyn DataObject,
    ) -> Result<(usize, &Arc<CompiledStatement>)> {
        let group = self.group(name, StatementKind::Query)?;
        let index = group.choose(obj);
        Ok((index, group.select(obj)?))
    }

    fn mapped<M: Model>(&self, name: &str, obj: &dyn DataObject) -> Result<Arc<ObjectMappedQuery<M>>> {
        let (index, statement) = self.variant(name, obj)?;

        let entry = self
            .mapped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((name.to_string(), index, TypeId::of::<M>()))
            .or_insert_with(|| {
                Arc::new(ObjectMappedQuery::<M>::new(statement.clone())) as Arc<dyn Any + Send + Sync>
            })
            .clone();

        entry.downcast::<ObjectMappedQuery<M>>().map_err(|_| {
            Error::invalid_result(format!("mapped query '{name}' has an unexpected type"))
        })
    }
}
