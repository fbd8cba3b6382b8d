//! Error types for tranquil-reader.
//!
//! Parsing and decoding never fail (malformed markup is repaired and invalid
//! byte sequences become U+FFFD), so the only fatal conditions are inputs with
//! nothing to read. Per-link URL problems are never errors; they surface as
//! warnings on the result instead.

/// Error type for reading-view operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document has no `<body>` or the body holds no content.
    #[error("No body content found")]
    NoContent,

    /// The user selection used as alternate input root was empty.
    #[error("Selection is empty")]
    EmptySelection,
}

/// Result type alias for reading-view operations.
pub type Result<T> = std::result::Result<T, Error>;
