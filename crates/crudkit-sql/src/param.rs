use crudkit_core::{Error, Result, SqlType};

/// A named positional parameter of a compiled statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Name of the source field the parameter binds from
    pub name: String,

    /// Declared SQL type of the placeholder
    pub ty: SqlType,

    /// When `true`, an absent source field binds NULL instead of failing
    pub nullable: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: SqlType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable,
        }
    }

    pub fn required(name: impl Into<String>, ty: SqlType) -> Self {
        Self::new(name, ty, false)
    }

    pub fn nullable(name: impl Into<String>, ty: SqlType) -> Self {
        Self::new(name, ty, true)
    }

    /// Parses one `name[?]:type` entry, where `?` marks the parameter
    /// nullable and `type` is a JDBC type name or code.
    pub fn parse(src: &str) -> Result<Self> {
        let (name, ty) = src
            .split_once(':')
            .ok_or_else(|| Error::configuration(format!("malformed parameter '{src}'")))?;

        let name = name.trim();
        let (name, nullable) = match name.strip_suffix('?') {
            Some(name) => (name.trim_end(), true),
            None => (name, false),
        };

        if name.is_empty() {
            return Err(Error::configuration(format!(
                "malformed parameter '{src}'; missing name"
            )));
        }

        Ok(Self::new(name, SqlType::parse(ty)?, nullable))
    }

    /// Parses a comma separated parameter list such as
    /// `id:INTEGER, email?:VARCHAR`.
    pub fn parse_list(src: &str) -> Result<Vec<Self>> {
        src.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl core::fmt::Display for Param {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let marker = if self.nullable { "?" } else { "" };
        write!(f, "<{}{marker}:{}>", self.name, self.ty)
    }
}
