//! Error types and result aliases for Lentil operations.
//!
//! Provides a unified error type covering manifest parsing, validation,
//! lockfile handling, and IO, with actionable error messages.

use thiserror::Error;

/// Unified error type for all Lentil operations
#[derive(Error, Debug)]
pub enum LentilError {
    // Manifest errors
    #[error("Failed to parse Pipfile: {message} at line {line}, column {column}")]
    ManifestParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to process JSON: {message}")]
    JsonParse { message: String },

    #[error("Manifest field '{field}' is invalid: {reason}")]
    Validation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Lentil operations
pub type LentilResult<T> = Result<T, LentilError>;

impl LentilError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LentilError::ManifestParse { .. } => {
                Some("Check the Pipfile for TOML syntax errors at the reported position")
            }
            LentilError::JsonParse { .. } => {
                Some("Regenerate Pipfile.lock with your package manager")
            }
            LentilError::Io { .. } => Some("Check that the path exists and is readable"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LentilError::ManifestParse {
            message: "unexpected token".to_string(),
            line: 4,
            column: 7,
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse Pipfile: unexpected token at line 4, column 7"
        );
        assert!(err.suggestion().is_some());

        let err = LentilError::Validation {
            field: "packages.requests".to_string(),
            reason: "bad constraint".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Manifest field 'packages.requests' is invalid: bad constraint"
        );
        assert!(err.suggestion().is_none());
    }
}
