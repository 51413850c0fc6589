/// The value of an enumerated field.
///
/// Both the variant name and its ordinal are carried so the binder can pick
/// either representation based on the declared placeholder type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueEnum {
    pub name: String,
    pub ordinal: i32,
}

impl ValueEnum {
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            name: name.into(),
            ordinal,
        }
    }
}
