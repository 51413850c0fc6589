use super::Error;

/// Error when a named parameter cannot be bound from a source object.
#[derive(Debug)]
pub(super) struct BindingError {
    field: Box<str>,
    owner: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    /// The non-nullable field is absent on the source object
    Missing,

    /// The value does not fit the placeholder, even after coercion
    Mismatch(Box<str>),
}

impl std::error::Error for BindingError {}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.reason {
            Reason::Missing => write!(
                f,
                "binding failed: missing non-nullable '{}' on {}",
                self.field, self.owner
            ),
            Reason::Mismatch(detail) => write!(
                f,
                "binding failed: '{}' on {}: {}",
                self.field, self.owner, detail
            ),
        }
    }
}

impl Error {
    /// Creates a binding error for a non-nullable field missing on `owner`.
    pub fn binding_missing(field: &str, owner: &str) -> Error {
        Error::from(super::ErrorKind::Binding(BindingError {
            field: field.into(),
            owner: owner.into(),
            reason: Reason::Missing,
        }))
    }

    /// Creates a binding error for a value the coercion ladder cannot fit.
    pub fn binding_mismatch(field: &str, owner: &str, detail: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Binding(BindingError {
            field: field.into(),
            owner: owner.into(),
            reason: Reason::Mismatch(detail.into().into()),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a binding error.
    pub fn is_binding(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Binding(_)))
    }
}
