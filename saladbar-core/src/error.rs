//! Error types shared by the codec and the stores.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A catalog or recipe line that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedRecord {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unknown product type '{0}'")]
    UnknownType(String),

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid boolean for {field}: '{value}'")]
    InvalidBool { field: &'static str, value: String },
}

/// Errors raised while reading or writing the catalog file or recipe files.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// The file or directory the failed operation touched.
    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::Io { path, .. } => path,
        }
    }
}

/// Caller-supplied values rejected before anything is mutated or written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be true or false, got '{value}'")]
    NotABool { field: &'static str, value: String },

    #[error("name cannot be empty")]
    EmptyName,

    #[error("name cannot contain '{0}'")]
    ReservedCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_messages() {
        let err = MalformedRecord::TooFewFields {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "expected at least 3 fields, found 2");

        let err = MalformedRecord::InvalidNumber {
            field: "calories",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "invalid number for calories: 'abc'");
    }

    #[test]
    fn test_storage_error_display_includes_path() {
        let err = StorageError::io(
            "/tmp/products.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/products.txt"));
        assert!(message.contains("denied"));
        assert_eq!(err.path(), &PathBuf::from("/tmp/products.txt"));
    }

    #[test]
    fn test_invalid_input_messages() {
        let err = InvalidInput::NotANumber {
            field: "weight",
            value: "lots".into(),
        };
        assert_eq!(err.to_string(), "weight must be a number, got 'lots'");
        assert_eq!(
            InvalidInput::ReservedCharacter(';').to_string(),
            "name cannot contain ';'"
        );
    }
}
