use chrono::{NaiveDate, NaiveDateTime};

use crate::{stmt::Value, Error};

macro_rules! impl_chrono_conversions {
    ($chrono:ty, $name:ident, $lit:literal) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Self::$name(value)
            }
        }

        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$name(value) => Ok(value),
                    _ => Err(Error::type_conversion(value, $lit)),
                }
            }
        }
    };
}

impl_chrono_conversions!(NaiveDateTime, Timestamp, "NaiveDateTime");
impl_chrono_conversions!(NaiveDate, Date, "NaiveDate");

/// Text layouts accepted when a driver reports a date as a string.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text layouts accepted when a driver reports a timestamp as a string.
pub(crate) const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl Value {
    /// Parses a date from its `YYYY-MM-DD` text form.
    pub fn parse_date(text: &str) -> crate::Result<Value> {
        Ok(Value::Date(NaiveDate::parse_from_str(text, DATE_FORMAT)?))
    }

    /// Parses a timestamp from one of the usual SQL text forms. A bare date is
    /// read as midnight.
    pub fn parse_timestamp(text: &str) -> crate::Result<Value> {
        for format in TIMESTAMP_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Value::Timestamp(ts));
            }
        }
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT)?;
        date.and_hms_opt(0, 0, 0)
            .map(Value::Timestamp)
            .ok_or_else(|| crate::err!("invalid timestamp '{text}'"))
    }
}
