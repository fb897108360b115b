//! Error types for markdownify.

use std::io;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors surfaced by the conversion pipeline.
///
/// Rendering itself never fails; every variant here originates from the
/// input side (parsing front end, decoding, or I/O).
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The parsing front end rejected the input markup.
    #[error("Front-end rejected input: {0}")]
    FrontEnd(String),

    /// The input bytes could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// I/O error while reading markup.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<tl::ParseError> for ConversionError {
    fn from(err: tl::ParseError) -> Self {
        Self::FrontEnd(format!("{err:?}"))
    }
}
