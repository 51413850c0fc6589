use crudkit_core::{
    stmt::{self, Value as CoreValue},
    Error, Result, SqlType,
};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a core value of the column's
    /// declared type. Columns without a declared type keep SQLite's storage
    /// class.
    pub fn from_sql(row: &Row, index: usize, ty: SqlType) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver)?;

        let core_value = match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => match ty {
                SqlType::Bit | SqlType::Boolean => CoreValue::Bool(value != 0),
                SqlType::TinyInt => i8::try_from(value).map_or(CoreValue::I64(value), CoreValue::I8),
                SqlType::SmallInt => {
                    i16::try_from(value).map_or(CoreValue::I64(value), CoreValue::I16)
                }
                SqlType::Integer => {
                    i32::try_from(value).map_or(CoreValue::I64(value), CoreValue::I32)
                }
                SqlType::Real | SqlType::Float | SqlType::Double => CoreValue::F64(value as f64),
                _ => CoreValue::I64(value),
            },
            SqlValue::Real(value) => CoreValue::F64(value),
            SqlValue::Text(value) => match ty {
                SqlType::Date => CoreValue::parse_date(&value).unwrap_or(CoreValue::String(value)),
                SqlType::Timestamp => {
                    CoreValue::parse_timestamp(&value).unwrap_or(CoreValue::String(value))
                }
                _ => CoreValue::String(value),
            },
            SqlValue::Blob(value) => CoreValue::Bytes(value),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        Ok(match &self.0 {
            Value::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            Value::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            Value::I8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::F32(v) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            Value::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            Value::Date(v) => ToSqlOutput::Owned(SqlValue::Text(v.format("%Y-%m-%d").to_string())),
            Value::Timestamp(v) => {
                ToSqlOutput::Owned(SqlValue::Text(v.format(TIMESTAMP_FORMAT).to_string()))
            }
            Value::Enum(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.name.as_bytes())),
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
        })
    }
}
