#[macro_use]
mod macros;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::Error;

mod object;
pub use object::{DataObject, Record};

pub mod schema;
pub use schema::{SchemaProbe, SqlType};

pub mod stmt;

/// A Result type alias that uses crudkit's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
