//! Error types for Voltchat operations.

use std::io;

use thiserror::Error;

use voltchat_parser::error::ParseError;

/// The main error type for Voltchat operations.
///
/// The `Parse` variant keeps the reply it was raised against so callers can
/// render labelled diagnostics.
#[derive(Debug, Error)]
pub enum VoltchatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),

    #[error("Chat error: {0}")]
    Chat(#[from] crate::chat::ChatError),
}

impl VoltchatError {
    /// Create a new `Parse` error with the reply it refers to.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
