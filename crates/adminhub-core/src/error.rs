//! Error types for AdminHub

use thiserror::Error;

/// Result type alias using AdminHub's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for AdminHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// A form submission was rejected
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Backend could not be reached (never produced by the simulated backend)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend rejected a write because of concurrent changes
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup or drawing failed
    #[error("Terminal error: {0}")]
    Tui(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from rejected user input.
    ///
    /// Validation failures leave the originating form open; anything else is
    /// reported and the form is left as-is.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text for a toast: validation messages as written, the rest in full
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = Error::validation("Name is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Name is required");
        assert_eq!(err.user_message(), "Name is required");
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("Client", "42");
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Client not found: 42");
    }
}
