//! Interpretation of chat-model replies.
//!
//! A completed reply is classified as plain text, an image directive or an
//! electrical diagram. Diagram payloads are validated into the semantic model
//! of `voltchat_core`, with rustc-style [`error::Diagnostic`]s describing what
//! was rejected or tolerated.

mod classify;
pub mod error;
mod fence;
mod span;
mod validate;
mod wire;

pub use classify::{Classification, classify, classify_with_diagnostics, parse_diagram};
pub use fence::{FencedBlock, find_json_block};
pub use span::Span;
pub use validate::ParsedDiagram;
