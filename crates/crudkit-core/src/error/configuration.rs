use super::Error;

/// Error when an action, a statement template or a parameter specification is
/// malformed.
///
/// This occurs when:
/// - A statement's `?` placeholder count differs from its parameter list
/// - A RETRIEVE targets a table without a primary key
/// - An optional SEARCH column has no recorded span in the generated WHERE clause
/// - A parameter specification string cannot be parsed
///
/// These errors are raised while statements are compiled and are never retried.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Creates the configuration error raised when a table needs a primary key.
    pub fn missing_primary_key(table: &str) -> Error {
        Error::configuration(format!("missing primary key on table {table}"))
    }

    /// Creates the configuration error raised when a statement's placeholder
    /// count differs from its parameter count.
    pub fn placeholder_mismatch(sql: &str, placeholders: usize, params: usize) -> Error {
        Error::configuration(format!(
            "wrong number of parameters in '{sql}'; placeholders={placeholders}, params={params}"
        ))
    }

    /// Returns `true` if this error, or any error it wraps, is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Configuration(_)))
    }
}
