use crudkit_core::{stmt::Value, DataObject, Error, Result, SqlType};

/// One field of a [`ParamDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, derived from the column name
    pub name: String,

    /// The source column
    pub column: String,

    pub ty: SqlType,

    /// Declared size of the column; zero when unspecified
    pub size: u32,

    /// Whether a request must carry a value for this field
    pub required: bool,
}

/// The request/response shape of a compiled action: its model name and one
/// field per distinct bound column, in table and column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks `obj` against the descriptor, reporting the first required
    /// field without a value or the first string longer than its column.
    pub fn validate(&self, obj: &dyn DataObject) -> Result<()> {
        for field in &self.fields {
            let value = obj.get(&field.name);

            match value {
                None | Some(Value::Null) if field.required => {
                    return Err(Error::binding_missing(&field.name, obj.type_name()));
                }
                Some(Value::String(ref s))
                    if field.size > 0
                        && field.ty.is_character()
                        && s.chars().count() > field.size as usize =>
                {
                    return Err(Error::binding_mismatch(
                        &field.name,
                        obj.type_name(),
                        format!("length {} exceeds size {}", s.chars().count(), field.size),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
