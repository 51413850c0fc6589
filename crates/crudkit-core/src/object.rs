use crate::stmt::Value;

use indexmap::IndexMap;

/// A source of named values for parameter binding.
///
/// `get` returns `None` when the object has no field of that name, which is
/// different from a field holding [`Value::Null`].
pub trait DataObject {
    /// Name of the object's type, used in binding errors.
    fn type_name(&self) -> &str;

    /// The value of the named field.
    fn get(&self, name: &str) -> Option<Value>;
}

/// A named-field bag: an ordered map from field name to value.
///
/// Records stand in for a request or result type when no dedicated struct
/// exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Sets a field, returning the record for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl DataObject for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

impl<T: DataObject + ?Sized> DataObject for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }
}
