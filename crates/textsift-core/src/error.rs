//! Error types for the textsift-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the textsift library.
#[derive(Error, Debug)]
pub enum TextsiftError {
    /// Document input error.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading input documents.
///
/// These are the only failures the pipeline surfaces per document; they end
/// up in the record's `errors` column rather than aborting a batch.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be decoded with any of the fallback encodings.
    #[error("could not decode file with any supported encoding: {}", .0.display())]
    Undecodable(PathBuf),

    /// The file exceeds the configured size limit.
    #[error("file too large: {} ({actual_mb:.2}MB > {limit_mb}MB)", .path.display())]
    TooLarge {
        path: PathBuf,
        actual_mb: f64,
        limit_mb: u64,
    },

    /// The file contained no text.
    #[error("empty file: {}", .0.display())]
    Empty(PathBuf),
}

/// Result type for the textsift library.
pub type Result<T> = std::result::Result<T, TextsiftError>;
