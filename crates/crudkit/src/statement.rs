use crate::{
    driver::{self, affected_row_count},
    CompiledStatement, Connection, DataObject, Error, Param, Result, Value,
};

use std::sync::Arc;

/// Executes a compiled statement, binding each parameter from the
/// same-named field of a source object.
#[derive(Debug, Clone)]
pub struct ParametricStatement {
    statement: Arc<CompiledStatement>,
}

impl ParametricStatement {
    pub fn new(statement: Arc<CompiledStatement>) -> Self {
        Self { statement }
    }

    /// Builds a statement from a parameter specification such as
    /// `id:INTEGER, email?:VARCHAR` and SQL text.
    pub fn parse(params: &str, sql: &str) -> Result<Self> {
        Ok(Self::new(Arc::new(CompiledStatement::parse(params, sql)?)))
    }

    pub fn statement(&self) -> &Arc<CompiledStatement> {
        &self.statement
    }

    pub fn params(&self) -> &[Param] {
        self.statement.params()
    }

    pub fn sql(&self) -> &str {
        self.statement.sql()
    }

    /// Executes with parameters bound from `obj`, returning the affected
    /// row count.
    pub fn execute_update(&self, conn: &dyn Connection, obj: &dyn DataObject) -> Result<u64> {
        self.run(|| {
            let mut stmt = conn.prepare(self.sql())?;
            self.bind(&mut *stmt, obj)?;
            stmt.execute_update()
        })
    }

    /// Executes once per object as a single batch, returning the summed
    /// row count.
    pub fn execute_update_batch<I, O>(&self, conn: &dyn Connection, objs: I) -> Result<u64>
    where
        I: IntoIterator<Item = O>,
        O: DataObject,
    {
        self.run(|| {
            let mut stmt = conn.prepare(self.sql())?;
            for obj in objs {
                self.bind(&mut *stmt, &obj)?;
                stmt.add_batch()?;
            }
            Ok(affected_row_count(&stmt.execute_batch()?))
        })
    }

    /// Executes an insert. With `want_keys` it returns the generated keys,
    /// one per inserted row; otherwise a single entry holding the row
    /// count.
    pub fn execute_insert(
        &self,
        conn: &dyn Connection,
        obj: &dyn DataObject,
        want_keys: bool,
    ) -> Result<Vec<i64>> {
        self.run(|| {
            let mut stmt = conn.prepare(self.sql())?;
            self.bind(&mut *stmt, obj)?;
            let rows = stmt.execute_update()?;
            if !want_keys {
                log::trace!("inserted; rows={rows}");
                return Ok(vec![row_count(rows)?]);
            }

            let keys = stmt.generated_keys()?;
            log::trace!("inserted; rows={rows} keys={keys:?}");
            Ok(keys)
        })
    }

    /// Inserts one row per object as a single batch, returning the summed
    /// row count.
    pub fn execute_insert_batch<I, O>(&self, conn: &dyn Connection, objs: I) -> Result<u64>
    where
        I: IntoIterator<Item = O>,
        O: DataObject,
    {
        self.execute_update_batch(conn, objs)
    }

    /// Binds every parameter of the statement from `obj`.
    pub fn bind(&self, stmt: &mut dyn driver::Statement, obj: &dyn DataObject) -> Result<()> {
        for (i, param) in self.params().iter().enumerate() {
            let index = i + 1;

            match obj.get(&param.name) {
                Some(value) if !value.is_null() => {
                    let value = fit(param, value, obj.type_name())?;
                    log::trace!("bind; index={index} param={} value={value:?}", param.name);
                    stmt.set(index, value, param.ty)?;
                }
                _ if param.nullable => {
                    log::trace!("bind; index={index} param={} value=NULL", param.name);
                    stmt.set_null(index, param.ty)?;
                }
                _ => return Err(Error::binding_missing(&param.name, obj.type_name())),
            }
        }

        Ok(())
    }

    /// Runs `f`, labelling any error with the statement.
    pub(crate) fn run<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        log::trace!("execute; sql={}", self.sql());
        f().map_err(|err| err.context(crudkit_core::err!("{}", self.label())))
    }

    fn label(&self) -> String {
        match self.statement.tag() {
            "" => format!("statement `{}`", self.sql()),
            tag => format!("statement {tag} `{}`", self.sql()),
        }
    }
}

pub(crate) fn row_count(rows: u64) -> Result<i64> {
    i64::try_from(rows).map_err(|_| Error::invalid_result(format!("row count {rows} out of range")))
}

/// Fits a non-null `value` to the placeholder of `param`.
///
/// Enum values become their name for character placeholders and their
/// ordinal otherwise. A value the placeholder does not accept gets one
/// coercion step; if that fails, or the result still does not fit, binding
/// fails.
pub(crate) fn fit(param: &Param, value: Value, owner: &str) -> Result<Value> {
    let value = match value {
        Value::Enum(v) if param.ty.is_character() => Value::String(v.name),
        Value::Enum(v) => Value::I32(v.ordinal),
        value => value,
    };

    if param.ty.accepts(&value) {
        return Ok(value);
    }

    let coerced = param
        .ty
        .value_ty()
        .and_then(|ty| value.coerce(ty))
        .filter(|coerced| param.ty.accepts(coerced));

    match coerced {
        Some(coerced) => {
            log::warn!(
                "coerced parameter; param={} from={value:?} to={coerced:?} ty={}",
                param.name,
                param.ty
            );
            Ok(coerced)
        }
        None => Err(Error::binding_mismatch(
            &param.name,
            owner,
            format!("{value:?} does not fit {}", param.ty),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{stmt::ValueEnum, SqlType};

    #[test]
    fn narrow_long_into_integer() {
        let param = Param::required("age", SqlType::Integer);
        assert_eq!(fit(&param, Value::I64(42), "Person").unwrap(), Value::I32(42));
    }

    #[test]
    fn enum_name_or_ordinal() {
        let closed = || Value::Enum(ValueEnum::new("Closed", 1));

        let text = Param::required("status", SqlType::VarChar);
        assert_eq!(fit(&text, closed(), "T").unwrap(), Value::from("Closed"));

        let number = Param::required("status", SqlType::SmallInt);
        assert_eq!(fit(&number, closed(), "T").unwrap(), Value::I16(1));
    }

    #[test]
    fn mismatch_after_coercion() {
        let param = Param::required("age", SqlType::Integer);
        let err = fit(&param, Value::from("forty"), "Person").unwrap_err();
        assert!(err.is_binding());
        assert_eq!(
            err.to_string(),
            "binding failed: 'age' on Person: String(\"forty\") does not fit INTEGER"
        );

        assert!(fit(&param, Value::I64(1 << 40), "Person").is_err());
    }
}
