//! Diagnostics produced while interpreting a model reply.
//!
//! Structured replies are checked in two passes. Problems that make the
//! payload unusable (bad JSON, missing fields, impossible geometry) are
//! errors and make the classifier fall back to plain text. Problems the
//! renderer can tolerate (dangling references, unknown terminals or
//! component types) are warnings and travel alongside the diagram.
//!
//! # Example
//!
//! ```
//! # use voltchat_parser::error::{Diagnostic, ErrorCode};
//! # use voltchat_parser::Span;
//! let diag = Diagnostic::warning("connection references unknown component `r9`")
//!     .with_code(ErrorCode::E300)
//!     .with_help("the wire is skipped");
//! assert_eq!(diag.code(), Some(ErrorCode::E300));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
