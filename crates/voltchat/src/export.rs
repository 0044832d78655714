//! Export functionality for diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Model reply
//!     ↓ classify
//! Semantic Model
//!     ↓ resolve terminals
//! Wires + placed symbols
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use std::io;

use voltchat_core::semantic::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `diagram` and writes the result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn export_diagram(&self, diagram: &Diagram, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`VoltchatError::Export`](crate::VoltchatError::Export) at
/// the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// The exporter could not be configured or the diagram not converted.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
