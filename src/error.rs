//! Error types and handling infrastructure for cipherpane.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **Non-fatal rendering**: agent and page errors are recorded per placeholder,
//!   never escalated into a blocking failure of the whole render pass
//! - **Context preservation**: include the identifier the operation was aimed at
//! - **Consistency**: standardized Result type across all modules

use thiserror::Error;

/// The main error type for cipherpane operations.
///
/// This enum covers all possible error conditions that can occur during
/// snapshot loading, page mutation, and display-surface creation.
#[derive(Error, Debug)]
pub enum CipherpaneError {
    /// The decryption agent rejected or errored while producing a surface
    #[error("Decryption agent failure: {message}")]
    AgentFailure { message: String },

    /// A page mutation referenced a message placeholder the page does not have
    #[error("Unknown message placeholder: {id}")]
    PlaceholderNotFound { id: String },

    /// A surface was aimed at a decryption container the page does not have
    #[error("Unknown decryption container: {id}")]
    ContainerNotFound { id: String },

    /// Page snapshot could not be read from disk
    #[error("Snapshot read failed: {message}")]
    SnapshotIo {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Page snapshot was readable but not a valid page description
    #[error("Snapshot format error: {message}")]
    SnapshotFormat { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for cipherpane operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the cipherpane codebase.
pub type Result<T> = std::result::Result<T, CipherpaneError>;

impl CipherpaneError {
    /// Create an AgentFailure with a descriptive message
    pub fn agent_failure(message: impl Into<String>) -> Self {
        Self::AgentFailure {
            message: message.into(),
        }
    }

    /// Create a PlaceholderNotFound for the given message identifier
    pub fn placeholder_not_found(id: impl Into<String>) -> Self {
        Self::PlaceholderNotFound { id: id.into() }
    }

    /// Create a ContainerNotFound for the given container identifier
    pub fn container_not_found(id: impl Into<String>) -> Self {
        Self::ContainerNotFound { id: id.into() }
    }

    /// Create a SnapshotIo from an io::Error with additional context
    pub fn snapshot_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::SnapshotIo {
            message: message.into(),
            source,
        }
    }

    /// Create a SnapshotFormat with a descriptive message
    pub fn snapshot_format(message: impl Into<String>) -> Self {
        Self::SnapshotFormat {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to CipherpaneError
impl From<std::io::Error> for CipherpaneError {
    fn from(err: std::io::Error) -> Self {
        Self::SnapshotIo {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}

// Automatic conversion from serde_json::Error to CipherpaneError
impl From<serde_json::Error> for CipherpaneError {
    fn from(err: serde_json::Error) -> Self {
        Self::SnapshotFormat {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let agent_err = CipherpaneError::agent_failure("armor checksum mismatch");
        assert_eq!(
            agent_err.to_string(),
            "Decryption agent failure: armor checksum mismatch"
        );

        let placeholder_err = CipherpaneError::placeholder_not_found("msg-17");
        assert_eq!(
            placeholder_err.to_string(),
            "Unknown message placeholder: msg-17"
        );

        let container_err = CipherpaneError::container_not_found("msg-17-view");
        assert_eq!(
            container_err.to_string(),
            "Unknown decryption container: msg-17-view"
        );
    }

    #[test]
    fn test_error_constructors() {
        let snapshot_err = CipherpaneError::snapshot_format("placeholders is not an array");
        matches!(snapshot_err, CipherpaneError::SnapshotFormat { .. });

        let other_err = CipherpaneError::other("Unknown error");
        matches!(other_err, CipherpaneError::Other { .. });
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CipherpaneError = io_err.into();

        match err {
            CipherpaneError::SnapshotIo { message, .. } => {
                assert_eq!(message, "IO operation failed");
            }
            _ => panic!("Expected SnapshotIo variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CipherpaneError = json_err.into();

        matches!(err, CipherpaneError::SnapshotFormat { .. });
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        let result = returns_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
    }
}
