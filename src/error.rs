//! Error types for the page engine.

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Missing DOM targets are not errors: they are skipped where they occur.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Carousel navigation outside `[0, len)`. Indicates a caller bug.
    #[error("media index {index} out of range (gallery has {len} items)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of items in the open gallery.
        len: usize,
    },

    /// A gallery was opened without any media.
    #[error("gallery for {subject:?} has no media items")]
    EmptyGallery {
        /// Project title the gallery was opened for.
        subject: String,
    },

    /// Navigation requested a section id outside the fixed set.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// The embedded content catalogue failed to parse.
    #[error("invalid content catalogue: {0}")]
    Content(#[from] serde_json::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
