use crate::{Cursor, Error, Model, ResultSetWorker, Result, Value};

use heck::ToLowerCamelCase;
use serde::Serialize;

/// A detached copy of a result set: column names and row values.
///
/// `rows` is `None` when the capture saw no rows, which keeps "queried,
/// nothing found" apart from an explicitly constructed empty set. Serializes
/// to `{"columns": [...], "rows": [[...], ...]}` with `"rows": null` for the
/// former.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CachedResultSet {
    columns: Vec<String>,
    rows: Option<Vec<Vec<Value>>>,
}

/// A [`ResultSetWorker`] that captures the cursor into a
/// [`CachedResultSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CachedResultSetBuilder;

impl CachedResultSet {
    pub fn new(columns: Vec<String>, rows: Option<Vec<Vec<Value>>>) -> Self {
        Self { columns, rows }
    }

    /// The worker form of [`from_cursor`](Self::from_cursor).
    pub fn builder() -> CachedResultSetBuilder {
        CachedResultSetBuilder
    }

    /// Captures every remaining row of `cursor`. Column names are converted
    /// to lower camel case.
    pub fn from_cursor(cursor: &mut dyn Cursor) -> Result<Self> {
        let columns = cursor
            .columns()
            .iter()
            .map(|column| column.name.to_lower_camel_case())
            .collect();

        let mut rows = vec![];
        while let Some(row) = cursor.next_row()? {
            rows.push(row);
        }

        log::trace!("captured result set; rows={}", rows.len());
        Ok(Self {
            columns,
            rows: (!rows.is_empty()).then_some(rows),
        })
    }

    /// Captures the fields of `models`, one row per model.
    pub fn from_models<M: Model>(models: &[M]) -> Self {
        Self::from_models_with(models, |_, value| value)
    }

    /// Captures the fields of `models`, passing each value through
    /// `transform` together with its field name.
    pub fn from_models_with<M, F>(models: &[M], mut transform: F) -> Self
    where
        M: Model,
        F: FnMut(&str, Value) -> Value,
    {
        let columns: Vec<String> = M::FIELDS.iter().map(|field| field.name()).collect();
        let rows = models
            .iter()
            .map(|model| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, name)| transform(name, model.get_field(index)))
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows: Some(rows),
        }
    }

    /// Captures any serializable records through their serde form. Each
    /// item must serialize to a map; columns come from the first item, in
    /// field order.
    pub fn from_serialize<T: Serialize>(items: &[T]) -> Result<Self> {
        let mut columns: Vec<String> = vec![];
        let mut rows = Vec::with_capacity(items.len());

        for item in items {
            let serde_json::Value::Object(map) = serde_json::to_value(item).map_err(anyhow_err)?
            else {
                return Err(Error::invalid_result("record does not serialize to a map"));
            };

            if columns.is_empty() {
                columns = map.keys().cloned().collect();
            }

            let row = columns
                .iter()
                .map(|column| map.get(column).map(json_to_value).unwrap_or_default())
                .collect();
            rows.push(row);
        }

        Ok(Self {
            columns,
            rows: Some(rows),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The captured rows, or `None` when the capture saw no rows.
    pub fn rows(&self) -> Option<&[Vec<Value>]> {
        self.rows.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// The value of column `name` in row `row`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name)?;
        self.rows.as_ref()?.get(row)?.get(index)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(anyhow_err)
    }
}

impl ResultSetWorker<CachedResultSet> for CachedResultSetBuilder {
    fn process(&mut self, cursor: &mut dyn Cursor) -> Result<CachedResultSet> {
        CachedResultSet::from_cursor(cursor)
    }
}

fn anyhow_err(err: serde_json::Error) -> Error {
    Error::from(anyhow::Error::from(err))
}

fn json_to_value(value: &serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match value {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(*v),
        Json::Number(v) => match v.as_i64() {
            Some(v) => Value::I64(v),
            None => v.as_f64().map_or(Value::Null, Value::F64),
        },
        Json::String(v) => Value::String(v.clone()),
        other => Value::String(other.to_string()),
    }
}
