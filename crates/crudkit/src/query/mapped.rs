use super::ParametricQuery;
use crate::{
    driver::ColumnMeta, CompiledStatement, Connection, Cursor, DataObject, Model, Result, Value,
};

use heck::ToLowerCamelCase;
use std::{
    marker::PhantomData,
    sync::{Arc, OnceLock},
};

/// A query that materializes each result row into a model.
///
/// Result columns are matched to model fields by their lower camel case
/// name; columns without a field are skipped. The matching is computed on
/// first execution and reused afterwards.
#[derive(Debug)]
pub struct ObjectMappedQuery<M> {
    query: ParametricQuery,

    /// Field index for each result column
    binding: OnceLock<Arc<[Option<usize>]>>,

    _p: PhantomData<fn() -> M>,
}

/// The rows of one execution of an [`ObjectMappedQuery`], materialized
/// lazily as the iterator is advanced.
pub struct MappedRows<'a, M> {
    cursor: &'a mut dyn Cursor,
    binding: Arc<[Option<usize>]>,
    done: bool,
    _p: PhantomData<fn() -> M>,
}

impl<M: Model> ObjectMappedQuery<M> {
    pub fn new(statement: Arc<CompiledStatement>) -> Self {
        Self::from_query(ParametricQuery::new(statement))
    }

    pub fn from_query(query: ParametricQuery) -> Self {
        Self {
            query,
            binding: OnceLock::new(),
            _p: PhantomData,
        }
    }

    pub fn query(&self) -> &ParametricQuery {
        &self.query
    }

    /// Executes the query and passes the lazily mapped rows to `f`.
    pub fn with_rows<T>(
        &self,
        conn: &dyn Connection,
        obj: &dyn DataObject,
        f: impl FnOnce(MappedRows<'_, M>) -> Result<T>,
    ) -> Result<T> {
        let mut f = Some(f);
        self.query.execute_select(conn, obj, |cursor: &mut dyn Cursor| {
            let rows = self.materialize(cursor);
            match f.take() {
                Some(f) => f(rows),
                None => Err(crudkit_core::err!("result worker invoked twice")),
            }
        })
    }

    /// Executes the query and collects every row.
    pub fn results(&self, conn: &dyn Connection, obj: &dyn DataObject) -> Result<Vec<M>> {
        self.with_rows(conn, obj, |rows| rows.collect())
    }

    /// Executes the query and appends every row to `out`, returning the
    /// number of rows added.
    pub fn results_into<C: Extend<M>>(
        &self,
        conn: &dyn Connection,
        obj: &dyn DataObject,
        out: &mut C,
    ) -> Result<usize> {
        self.with_rows(conn, obj, |rows| {
            let mut count = 0;
            for row in rows {
                out.extend(Some(row?));
                count += 1;
            }
            Ok(count)
        })
    }

    /// Maps the rows of `cursor`.
    pub fn materialize<'a>(&self, cursor: &'a mut dyn Cursor) -> MappedRows<'a, M> {
        let binding = self
            .binding
            .get_or_init(|| bind_columns::<M>(cursor.columns()))
            .clone();

        MappedRows {
            cursor,
            binding,
            done: false,
            _p: PhantomData,
        }
    }
}

fn bind_columns<M: Model>(columns: &[ColumnMeta]) -> Arc<[Option<usize>]> {
    columns
        .iter()
        .map(|column| {
            let index = M::field_index(&column.name.to_lower_camel_case());
            if index.is_none() {
                log::trace!("column has no field; model={} column={}", M::NAME, column.name);
            }
            index
        })
        .collect()
}

impl<M: Model> MappedRows<'_, M> {
    fn load(&self, row: Vec<Value>) -> Result<M> {
        let mut model = M::default();

        for (value, index) in row.into_iter().zip(self.binding.iter()) {
            let Some(index) = *index else {
                continue;
            };
            let field = &M::FIELDS[index];

            // NULL into a non-optional field keeps its default
            if value.is_null() && !field.nullable {
                continue;
            }

            let value = if value.is_a(field.ty) {
                value
            } else {
                match value.coerce(field.ty) {
                    Some(coerced) => {
                        log::warn!(
                            "coerced column; model={} field={} from={value:?} to={coerced:?}",
                            M::NAME,
                            field.ident
                        );
                        coerced
                    }
                    None => value,
                }
            };

            model.set_field(index, value)?;
        }

        Ok(model)
    }
}

impl<M: Model> Iterator for MappedRows<'_, M> {
    type Item = Result<M>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.cursor.next_row() {
            Ok(Some(row)) => Some(self.load(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
