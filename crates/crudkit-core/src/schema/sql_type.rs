use crate::{stmt, Error, Result};

/// The declared SQL type of a column or placeholder.
///
/// Variants carry the JDBC type codes (`java.sql.Types`) so parameter
/// specifications written as `name:12` and `name:VARCHAR` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    Date,
    Time,
    Timestamp,
    Binary,
    VarBinary,
    Blob,
    Clob,
    Boolean,
    Null,

    /// Any type code not listed above
    Other(i32),
}

const NAMED: &[(SqlType, i32, &str)] = &[
    (SqlType::Bit, -7, "BIT"),
    (SqlType::TinyInt, -6, "TINYINT"),
    (SqlType::SmallInt, 5, "SMALLINT"),
    (SqlType::Integer, 4, "INTEGER"),
    (SqlType::BigInt, -5, "BIGINT"),
    (SqlType::Float, 6, "FLOAT"),
    (SqlType::Real, 7, "REAL"),
    (SqlType::Double, 8, "DOUBLE"),
    (SqlType::Numeric, 2, "NUMERIC"),
    (SqlType::Decimal, 3, "DECIMAL"),
    (SqlType::Char, 1, "CHAR"),
    (SqlType::VarChar, 12, "VARCHAR"),
    (SqlType::LongVarChar, -1, "LONGVARCHAR"),
    (SqlType::NChar, -15, "NCHAR"),
    (SqlType::NVarChar, -9, "NVARCHAR"),
    (SqlType::Date, 91, "DATE"),
    (SqlType::Time, 92, "TIME"),
    (SqlType::Timestamp, 93, "TIMESTAMP"),
    (SqlType::Binary, -2, "BINARY"),
    (SqlType::VarBinary, -3, "VARBINARY"),
    (SqlType::Blob, 2004, "BLOB"),
    (SqlType::Clob, 2005, "CLOB"),
    (SqlType::Boolean, 16, "BOOLEAN"),
    (SqlType::Null, 0, "NULL"),
];

impl SqlType {
    /// The JDBC type code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Other(code) => *code,
            ty => NAMED
                .iter()
                .find(|(named, _, _)| named == ty)
                .map(|(_, code, _)| *code)
                .unwrap_or(1111),
        }
    }

    pub fn from_code(code: i32) -> Self {
        NAMED
            .iter()
            .find(|(_, named, _)| *named == code)
            .map(|(ty, _, _)| *ty)
            .unwrap_or(Self::Other(code))
    }

    /// Parses a symbolic (`VARCHAR`) or numeric (`12`) type code.
    pub fn parse(src: &str) -> Result<Self> {
        let src = src.trim();
        if let Ok(code) = src.parse::<i32>() {
            return Ok(Self::from_code(code));
        }
        NAMED
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(src))
            .map(|(ty, _, _)| *ty)
            .ok_or_else(|| Error::configuration(format!("unknown SQL type '{src}'")))
    }

    /// Maps a declared column type such as `varchar(64)` or `BIGINT` to a type
    /// and precision, following SQLite's type-affinity rules for names it
    /// does not know.
    pub fn from_decl(decl: &str) -> (Self, u32) {
        let upper = decl.trim().to_ascii_uppercase();
        let (name, precision) = match upper.split_once('(') {
            Some((name, rest)) => {
                let digits = rest
                    .trim_end_matches(')')
                    .split(',')
                    .next()
                    .and_then(|p| p.trim().parse().ok())
                    .unwrap_or(0);
                (name.trim().to_string(), digits)
            }
            None => (upper, 0),
        };

        let ty = match name.as_str() {
            "" => Self::Null,
            "TINYINT" => Self::TinyInt,
            "SMALLINT" | "INT2" => Self::SmallInt,
            "INT" | "INTEGER" | "MEDIUMINT" | "INT4" => Self::Integer,
            "BIGINT" | "INT8" | "UNSIGNED BIG INT" => Self::BigInt,
            // SQLite stores every floating point value in 8 bytes
            "REAL" | "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" => Self::Double,
            "NUMERIC" => Self::Numeric,
            "DECIMAL" => Self::Decimal,
            "CHAR" | "CHARACTER" => Self::Char,
            "NCHAR" | "NATIVE CHARACTER" => Self::NChar,
            "NVARCHAR" => Self::NVarChar,
            "TEXT" | "CLOB" => Self::Clob,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME" | "TIMESTAMP" => Self::Timestamp,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "BIT" => Self::Bit,
            "BLOB" => Self::Blob,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            name if name.contains("INT") => Self::BigInt,
            name if name.contains("CHAR") => Self::VarChar,
            name if name.contains("CLOB") || name.contains("TEXT") => Self::Clob,
            name if name.contains("REAL") || name.contains("FLOA") || name.contains("DOUB") => {
                Self::Double
            }
            _ => Self::Numeric,
        };

        (ty, precision)
    }

    /// Character-like types receive enum values by variant name; every other
    /// type receives the ordinal.
    pub const fn is_character(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::VarChar | Self::LongVarChar | Self::NChar | Self::NVarChar | Self::Clob
        )
    }

    /// The value type a placeholder of this SQL type accepts without coercion.
    ///
    /// `None` means the type accepts any value as is.
    pub const fn value_ty(&self) -> Option<stmt::Type> {
        use stmt::Type;

        Some(match self {
            Self::Bit | Self::Boolean => Type::Bool,
            Self::TinyInt => Type::I8,
            Self::SmallInt => Type::I16,
            Self::Integer => Type::I32,
            Self::BigInt => Type::I64,
            Self::Real => Type::F32,
            Self::Float | Self::Double => Type::F64,
            Self::Char | Self::VarChar | Self::LongVarChar | Self::NChar | Self::NVarChar => {
                Type::String
            }
            Self::Clob | Self::Time => Type::String,
            Self::Date => Type::Date,
            Self::Timestamp => Type::Timestamp,
            Self::Binary | Self::VarBinary | Self::Blob => Type::Bytes,
            Self::Numeric | Self::Decimal | Self::Null | Self::Other(_) => return None,
        })
    }

    /// Returns `true` if `value` fits a placeholder of this type as is.
    pub fn accepts(&self, value: &stmt::Value) -> bool {
        match self {
            _ if value.is_null() => true,
            Self::Numeric | Self::Decimal => value.is_numeric(),
            ty => match ty.value_ty() {
                Some(expect) => value.is_a(expect),
                None => true,
            },
        }
    }
}

impl core::fmt::Display for SqlType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{code}"),
            ty => match NAMED.iter().find(|(named, _, _)| named == ty) {
                Some((_, _, name)) => f.write_str(name),
                None => write!(f, "{}", ty.code()),
            },
        }
    }
}
