use crate::Param;

use crudkit_core::{Error, Result};

/// A resolved SQL template plus its ordered parameter list.
///
/// The number of `?` placeholders in the SQL text always equals the number
/// of parameters. Question marks inside quoted literals do not count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStatement {
    params: Vec<Param>,
    sql: String,
    tag: String,
}

impl CompiledStatement {
    pub fn new(params: Vec<Param>, sql: impl Into<String>) -> Result<Self> {
        let sql = sql.into();
        let placeholders = count_placeholders(&sql);

        if placeholders != params.len() {
            return Err(Error::placeholder_mismatch(&sql, placeholders, params.len()));
        }

        Ok(Self {
            params,
            sql,
            tag: String::new(),
        })
    }

    /// Builds a statement from a parameter specification string, see
    /// [`Param::parse_list`].
    pub fn parse(params: &str, sql: impl Into<String>) -> Result<Self> {
        Self::new(Param::parse_list(params)?, sql)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl core::fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("[")?;
        for param in &self.params {
            write!(f, "<{}>", param.name)?;
        }
        write!(f, "]{}", self.sql)
    }
}

/// Counts `?` placeholders outside single- and double-quoted literals.
pub(crate) fn count_placeholders(sql: &str) -> usize {
    let mut quote = None;
    let mut count = 0;

    for ch in sql.chars() {
        match (quote, ch) {
            (None, '\'' | '"') => quote = Some(ch),
            (Some(open), _) if ch == open => quote = None,
            (None, '?') => count += 1,
            _ => {}
        }
    }

    count
}
