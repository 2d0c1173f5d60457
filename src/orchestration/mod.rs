//! Request workflows over the repository and the audio store.
//!
//! - `LineRegistry` creates and lists lines
//! - `AudioLibrary` uploads, deletes, lists, and resolves stored audio
//!
//! Both classify repository and filesystem failures into `CatalogError`; they
//! compensate (remove a just-written file) but never retry.

pub mod audio;
pub mod lines;

pub use audio::{AudioLibrary, UploadRequest, UploadedFile};
pub use lines::LineRegistry;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or empty required input.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Duplicate line name or audio filename.
    #[error("{0}")]
    Conflict(String),
    /// Filesystem write failure.
    #[error("{message}: {source}")]
    Storage {
        message: String,
        #[source]
        source: std::io::Error,
    },
    /// Database statement failure.
    #[error("{message}: {source}")]
    Persistence {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl CatalogError {
    pub(crate) fn persistence(message: impl Into<String>, source: sqlx::Error) -> Self {
        CatalogError::Persistence {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::Storage {
            message: message.into(),
            source,
        }
    }
}
