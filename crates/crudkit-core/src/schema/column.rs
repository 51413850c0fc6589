use super::SqlType;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The declared SQL type of the column.
    pub ty: SqlType,

    /// Declared precision or length; zero when unspecified.
    pub precision: u32,

    /// Whether or not the column is nullable
    pub nullable: bool,
}

/// A foreign key edge from one of a table's columns to another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedKey {
    /// The referencing column in this table
    pub column: String,

    /// The table the column refers to
    pub referenced_table: String,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            ty,
            precision: 0,
            nullable: true,
        }
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl ImportedKey {
    pub fn new(column: impl Into<String>, referenced_table: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            referenced_table: referenced_table.into(),
        }
    }
}
