use crate::{stmt::Type, Primitive, Result, Value};

use chrono::{NaiveDate, NaiveDateTime};

impl Primitive for NaiveDate {
    const TYPE: Type = Type::Date;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(ref v) => Value::parse_date(v)?.try_into(),
            _ => value.try_into(),
        }
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl Primitive for NaiveDateTime {
    const TYPE: Type = Type::Timestamp;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(ref v) => Value::parse_timestamp(v)?.try_into(),
            _ => value.try_into(),
        }
    }

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}
