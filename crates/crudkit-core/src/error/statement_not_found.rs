use super::Error;

/// Error when a logical statement name is not registered.
#[derive(Debug)]
pub(super) struct StatementNotFoundError {
    name: Box<str>,
}

impl std::error::Error for StatementNotFoundError {}

impl core::fmt::Display for StatementNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "statement '{}' not found", self.name)
    }
}

impl Error {
    /// Creates a lookup error for an unregistered statement name.
    pub fn statement_not_found(name: &str) -> Error {
        Error::from(super::ErrorKind::StatementNotFound(StatementNotFoundError {
            name: name.into(),
        }))
    }

    /// Returns `true` if this error is a statement lookup error.
    pub fn is_statement_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::StatementNotFound(_)))
    }
}
