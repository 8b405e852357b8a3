//! Request-time error types
//!
//! Every failure a handler can hit is operational (a file missing or
//! malformed on disk). The router turns any of them into a generic 500.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for request handlers
pub type ServeResult<T> = Result<T, ServeError>;

#[derive(Debug, Error)]
pub enum ServeError {
    /// File missing or unreadable
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Template could not be rendered
    #[error("cannot render template '{}': {reason}", .path.display())]
    Template { path: PathBuf, reason: String },
}

impl ServeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
