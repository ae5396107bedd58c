//! Error types for bundle ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading bundle files.
///
/// Only the directory variants are fatal to a run; everything else is
/// attached to the file it came from and reported in the read summary.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Document Errors ===
    /// File content is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level JSON value is not an object.
    #[error("top-level value in {path} is not an object")]
    NotAnObject { path: PathBuf },

    /// Bundle structure does not match the expected shape.
    #[error("malformed bundle {path}: {source}")]
    InvalidBundle {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::DirectoryNotFound {
            path: PathBuf::from("/data/fhir"),
        };
        assert_eq!(err.to_string(), "directory not found: /data/fhir");
    }

    #[test]
    fn test_json_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IngestError::JsonParse {
            path: PathBuf::from("broken.json"),
            source,
        };
        assert!(err.to_string().starts_with("failed to parse JSON broken.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
