use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Caller-supplied data violates a field rule; the message is surfaced verbatim
    #[error("{message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than infrastructure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidId { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Book 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Book 'abc' not found");
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let error = DomainError::validation("author must not be empty");
        assert_eq!(error.to_string(), "author must not be empty");
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn test_storage_error_is_not_invalid_argument() {
        let error = DomainError::storage("connection reset");
        assert_eq!(error.to_string(), "Storage error: connection reset");
        assert!(!error.is_invalid_argument());
    }
}
