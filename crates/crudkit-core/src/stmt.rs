mod coerce;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_chrono;

mod value_enum;
pub use value_enum::ValueEnum;

mod value_serde;
