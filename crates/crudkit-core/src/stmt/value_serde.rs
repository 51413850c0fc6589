use super::{value_chrono::DATE_FORMAT, Value};

use serde::ser::{Serialize, Serializer};

/// Values serialize to their native JSON-compatible form: numbers as numbers,
/// strings as strings, null as null. Dates and timestamps are written as ISO
/// 8601 text and enums by variant name.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.collect_seq(v),
            Value::Date(v) => serializer.collect_str(&v.format(DATE_FORMAT)),
            Value::Timestamp(v) => serializer.collect_str(&v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Enum(v) => serializer.serialize_str(&v.name),
            Value::Null => serializer.serialize_unit(),
        }
    }
}
