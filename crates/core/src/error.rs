//! Error types for slide-deck content extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that make one input file unreadable.
///
/// Every variant is fatal only to the file that raised it; batch processing
/// logs the error and continues with the remaining files. Recoverable
/// degradations (an unclassifiable shape, a malformed diagram, a failed
/// media write) never surface here — they are reported through
/// [`crate::Diagnostics`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a presentation package this backend understands.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A package part referenced by a relationship does not exist.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Invalid or corrupted package structure.
    #[error("Invalid or corrupted presentation: {0}")]
    Corrupted(String),
}
