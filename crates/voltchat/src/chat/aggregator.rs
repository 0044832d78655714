//! Accumulation of streamed reply fragments.

use log::{debug, trace};

use voltchat_parser::{Classification, classify_with_diagnostics, error::Diagnostic};

use crate::chat::ChatError;

/// Accumulates the fragments of one turn and classifies the result once.
///
/// The aggregator is idle until [`begin`](Self::begin) is called, collects
/// fragments while streaming, and returns to idle on
/// [`finish`](Self::finish) or [`abort`](Self::abort).
///
/// # Examples
///
/// ```
/// # use voltchat::chat::StreamAggregator;
/// # use voltchat::Classification;
/// let mut aggregator = StreamAggregator::new();
/// aggregator.begin().unwrap();
/// aggregator.push("Hello, ").unwrap();
/// assert_eq!(aggregator.push("world").unwrap(), "Hello, world");
///
/// let (classification, _) = aggregator.finish().unwrap();
/// assert_eq!(classification, Classification::PlainText("Hello, world".into()));
/// assert!(!aggregator.is_streaming());
/// ```
#[derive(Debug, Default)]
pub struct StreamAggregator {
    buffer: String,
    streaming: bool,
    fragments: usize,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Starts a new turn with an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::TurnInProgress`] when a turn is already streaming.
    pub fn begin(&mut self) -> Result<(), ChatError> {
        if self.streaming {
            return Err(ChatError::TurnInProgress);
        }
        self.buffer.clear();
        self.fragments = 0;
        self.streaming = true;
        Ok(())
    }

    /// Appends a fragment and returns the text accumulated so far.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NoActiveTurn`] when no turn is streaming.
    pub fn push(&mut self, fragment: &str) -> Result<&str, ChatError> {
        if !self.streaming {
            return Err(ChatError::NoActiveTurn);
        }
        self.buffer.push_str(fragment);
        self.fragments += 1;
        trace!(fragment_len = fragment.len(), total_len = self.buffer.len(); "Fragment received");
        Ok(&self.buffer)
    }

    /// Ends the turn and classifies the accumulated reply.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NoActiveTurn`] when no turn is streaming.
    pub fn finish(&mut self) -> Result<(Classification, Vec<Diagnostic>), ChatError> {
        if !self.streaming {
            return Err(ChatError::NoActiveTurn);
        }
        self.streaming = false;
        let reply = std::mem::take(&mut self.buffer);
        debug!(fragments = self.fragments, reply_len = reply.len(); "Stream complete");
        Ok(classify_with_diagnostics(&reply))
    }

    /// Discards the in-progress turn.
    pub fn abort(&mut self) {
        debug!(fragments = self.fragments; "Stream aborted");
        self.buffer.clear();
        self.streaming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let mut aggregator = StreamAggregator::new();
        aggregator.begin().unwrap();
        assert_eq!(aggregator.begin(), Err(ChatError::TurnInProgress));
    }

    #[test]
    fn test_push_and_finish_require_a_turn() {
        let mut aggregator = StreamAggregator::new();
        assert_eq!(aggregator.push("x"), Err(ChatError::NoActiveTurn));
        assert!(matches!(aggregator.finish(), Err(ChatError::NoActiveTurn)));
    }

    #[test]
    fn test_empty_stream_is_empty_text() {
        let mut aggregator = StreamAggregator::new();
        aggregator.begin().unwrap();
        let (classification, diagnostics) = aggregator.finish().unwrap();

        assert_eq!(classification, Classification::PlainText(String::new()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_fragments_split_inside_json() {
        let mut aggregator = StreamAggregator::new();
        aggregator.begin().unwrap();
        for fragment in [r#"{"action":"gener"#, r#"ate_image","pro"#, r#"mpt":"a fox"}"#] {
            aggregator.push(fragment).unwrap();
        }

        let (classification, _) = aggregator.finish().unwrap();
        assert_eq!(
            classification,
            Classification::ImageDirective("a fox".to_string())
        );
    }

    #[test]
    fn test_abort_discards_and_allows_next_turn() {
        let mut aggregator = StreamAggregator::new();
        aggregator.begin().unwrap();
        aggregator.push("partial").unwrap();
        aggregator.abort();

        assert!(!aggregator.is_streaming());
        aggregator.begin().unwrap();
        assert_eq!(aggregator.push("fresh").unwrap(), "fresh");
    }
}
