//! Streaming chat turns.
//!
//! A [`ChatSession`] owns the state of one conversation and drives one turn
//! at a time: it pulls reply fragments from a source, shows the growing text,
//! classifies the completed reply once, and hands the result to a
//! [`MessageView`]. Image directives are fulfilled by an [`ImageGenerator`]
//! after the turn has been classified.
//!
//! The transport, the image service and the display are collaborators behind
//! the traits in this module.

mod aggregator;
mod session;

pub use aggregator::StreamAggregator;
pub use session::{ChatSession, TurnOutcome};

use thiserror::Error;

/// Notice shown when a turn or an image request fails.
pub const FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

/// Errors of the turn lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("a turn is already in progress")]
    TurnInProgress,

    #[error("no turn is in progress")]
    NoActiveTurn,
}

/// Failure reported by the transport that streams a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by an [`ImageGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("no image backend is configured")]
    Unavailable,

    #[error("image generation failed: {0}")]
    Failed(String),
}

/// A generated image, ready for display. The bytes are not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    media_type: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Produces an image for a prompt.
pub trait ImageGenerator {
    /// Generates one image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] when no image could be produced.
    fn generate(&mut self, prompt: &str) -> Result<ImagePayload, ImageError>;
}

/// The display of the message a turn is writing into.
///
/// Every turn produces exactly one message. While fragments arrive the
/// message is updated with [`show_partial`](Self::show_partial); afterwards
/// it is replaced by the classified result, or retracted when the transport
/// fails.
pub trait MessageView {
    /// Replace the message with the reply accumulated so far.
    fn show_partial(&mut self, text: &str);

    /// Replace the message with the final reply text.
    fn show_text(&mut self, text: &str);

    /// Show that an image for `prompt` is being generated.
    fn show_loading(&mut self, prompt: &str);

    /// Remove the loading indicator.
    fn clear_loading(&mut self);

    fn show_image(&mut self, image: &ImagePayload);

    /// Replace the message with a rendered SVG diagram.
    fn show_diagram(&mut self, svg: &str);

    /// Show a generic failure notice.
    fn show_failure(&mut self, notice: &str);

    /// Remove the in-progress message entirely.
    fn retract(&mut self);
}
