//! Error types shared across the txnlog crates
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Codec-level failures (encode/decode/end-of-data) have
//! their own taxonomy in `txnlog-codec`; this type covers domain-type
//! construction and payload-body deserialization faults.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the core domain layer
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization/deserialization error in a payload body
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid operation or state (e.g. builder misuse)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_serialization() {
        let err = Error::Serialization("invalid format".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Serialization error"));
        assert!(msg.contains("invalid format"));
    }

    #[test]
    fn test_error_display_invalid_operation() {
        let err = Error::InvalidOperation("sentinel id/time".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid operation"));
        assert!(msg.contains("sentinel id/time"));
    }

    #[test]
    fn test_error_from_bincode() {
        // Deserializing garbage as a String fails with a bincode error
        let invalid_data = vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let result: Result<String> = bincode::deserialize(&invalid_data).map_err(|e| e.into());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
