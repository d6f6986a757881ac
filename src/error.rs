//! Error types for the quizboard service.

use thiserror::Error;

/// Main error type for quizboard operations.
#[derive(Error, Debug)]
pub enum QuizboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Holiday source error: {0}")]
    Holiday(#[from] HolidayError),

    #[error("Suggestion service error: {0}")]
    Suggestion(#[from] SuggestionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Quiz store errors, shared by all backends.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Quiz not found: {0}")]
    NotFound(String),

    #[error("Write conflict: the stored document changed since it was last read")]
    Conflict,

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Malformed record: {0}")]
    Malformed(String),
}

/// Holiday source errors.
#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Suggestion service errors.
#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("API key not provided and GEMINI_API_KEY env var not set")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("The model returned no completion text")]
    EmptyCompletion,
}

/// Input validation errors, rejected before a record reaches the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type alias for quizboard operations.
pub type Result<T> = std::result::Result<T, QuizboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuizboardError::Config(ConfigError::MissingField("store.document.token".into()));
        assert!(err.to_string().contains("store.document.token"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuizboardError = io_err.into();
        assert!(matches!(err, QuizboardError::Io(_)));
    }

    #[test]
    fn test_conflict_is_store_error() {
        let err: QuizboardError = StoreError::Conflict.into();
        assert!(matches!(err, QuizboardError::Store(StoreError::Conflict)));
    }
}
