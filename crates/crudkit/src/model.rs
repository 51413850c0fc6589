use crate::{stmt::Type, DataObject, Result, Value};

use heck::ToLowerCamelCase;

/// A typed record that statements bind from and queries materialize into.
///
/// Implementations are generated by [`model!`](crate::model!). Fields are
/// addressed by index into [`FIELDS`](Model::FIELDS) and by their logical
/// name, the lower camel case form of the Rust field name.
pub trait Model: DataObject + Default + 'static {
    /// Name of the type, used in binding errors
    const NAME: &'static str;

    /// The model's fields in declaration order
    const FIELDS: &'static [Field];

    /// Index of the field with the given logical name.
    fn field_index(name: &str) -> Option<usize>;

    fn get_field(&self, index: usize) -> Value;

    /// Loads `value` into the field at `index`.
    fn set_field(&mut self, index: usize, value: Value) -> Result<()>;
}

/// Static description of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The Rust identifier
    pub ident: &'static str,

    pub ty: Type,

    /// `true` for `Option` fields
    pub nullable: bool,
}

impl Field {
    pub const fn new(ident: &'static str, ty: Type, nullable: bool) -> Self {
        Self {
            ident,
            ty,
            nullable,
        }
    }

    /// The logical field name.
    pub fn name(&self) -> String {
        self.ident.to_lower_camel_case()
    }
}

/// Logical names of `fields`, in order.
#[doc(hidden)]
pub fn field_names(fields: &[Field]) -> Vec<String> {
    fields.iter().map(Field::name).collect()
}
