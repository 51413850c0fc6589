/// Types of values, from crudkit's point of view.
///
/// These are the types a model field can hold. They are distinct from
/// [`SqlType`](crate::SqlType), the declared type of a column or placeholder
/// as reported by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,

    /// A calendar date without time
    Date,

    /// A date and time without time zone
    Timestamp,

    /// An enumerated type, bound either by variant name or by ordinal
    Enum,
}

impl Type {
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::F32 | Self::F64
        )
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
            Self::Enum => "Enum",
        }
    }
}
