pub mod action;
pub use action::{Action, Arg, Comparator, Operation, Restriction};

mod cache;
pub use cache::{stats as cache_stats, CacheKey, CacheStats};

mod command;
pub use command::{CrudCommand, TableRef};

mod compile;
pub use compile::CrudModel;

mod config;
pub use config::CrudConfig;

mod descriptor;
pub use descriptor::{FieldSpec, ParamDescriptor};

mod group;
pub use group::{StatementGroup, StatementKind};

mod param;
pub use param::Param;

mod statement;
pub use statement::CompiledStatement;

pub use crudkit_core::{Error, Result};
