mod cached;
pub use cached::{CachedResultSet, CachedResultSetBuilder};

#[macro_use]
mod macros;

pub mod model;
pub use model::{Field, Model};

mod persistence;
pub use persistence::Persistence;

mod primitive;
pub use primitive::Primitive;

mod primitive_chrono;

pub mod query;
pub use query::{MappedRows, ObjectMappedQuery, ParametricQuery, ResultSetWorker};

mod registry;
pub use registry::Registry;

pub mod statement;
pub use statement::ParametricStatement;

pub use crudkit_core::{
    driver::{self, Connection, Cursor},
    schema::{self, SchemaProbe, SqlType},
    stmt::{self, Value, ValueEnum},
    DataObject, Error, Record, Result,
};
pub use crudkit_sql::{
    Action, CompiledStatement, CrudCommand, CrudConfig, Operation, Param, ParamDescriptor,
    StatementGroup,
};

#[cfg(feature = "sqlite")]
pub use crudkit_driver_sqlite as sqlite;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{model::Field, DataObject, Error, Model, Primitive, Result};
    pub use core::{default::Default, option::Option};
    pub use crudkit_core::stmt::{Type, Value, ValueEnum};
    pub use heck::ToLowerCamelCase;
    pub use std::sync::OnceLock;
}
