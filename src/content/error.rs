//! Content errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a content collection
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front-matter is present but does not satisfy the collection schema
    #[error("invalid front-matter in {}: {message}", .path.display())]
    Schema { path: PathBuf, message: String },

    #[error("invalid meta.json in {}: {source}", .path.display())]
    Meta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
