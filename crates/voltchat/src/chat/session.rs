//! The chat session: one conversation, one turn at a time.

use log::{info, warn};

use voltchat_core::semantic::Diagram;
use voltchat_parser::Classification;

use crate::{
    ResponseRenderer, VoltchatError,
    chat::{
        ChatError, FAILURE_NOTICE, ImageGenerator, MessageView, StreamAggregator, TransportError,
    },
    config::AppConfig,
    export::svg::Svg,
};

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply was shown as text.
    Text,
    /// An image was generated and shown.
    Image,
    /// An image directive was received but generation failed.
    ImageFailed,
    /// A diagram was rendered and shown.
    Diagram,
    /// The transport failed and the message was retracted.
    TransportFailed,
}

/// Conversation state, created once and kept for the lifetime of the process.
///
/// The session is passed explicitly to whatever drives the conversation;
/// a second turn cannot start while one is streaming.
///
/// # Examples
///
/// ```
/// # use voltchat::chat::{ChatSession, ImageError, ImageGenerator, ImagePayload, MessageView, TurnOutcome};
/// # use voltchat::config::AppConfig;
/// #[derive(Default)]
/// struct Transcript(Vec<String>);
///
/// impl MessageView for Transcript {
///     fn show_partial(&mut self, _text: &str) {}
///     fn show_text(&mut self, text: &str) { self.0.push(text.to_string()); }
///     fn show_loading(&mut self, _prompt: &str) {}
///     fn clear_loading(&mut self) {}
///     fn show_image(&mut self, _image: &ImagePayload) {}
///     fn show_diagram(&mut self, svg: &str) { self.0.push(svg.to_string()); }
///     fn show_failure(&mut self, notice: &str) { self.0.push(notice.to_string()); }
///     fn retract(&mut self) {}
/// }
///
/// struct NoImages;
///
/// impl ImageGenerator for NoImages {
///     fn generate(&mut self, _prompt: &str) -> Result<ImagePayload, ImageError> {
///         Err(ImageError::Unavailable)
///     }
/// }
///
/// let mut session = ChatSession::new(AppConfig::default()).unwrap();
/// let mut view = Transcript::default();
/// let fragments = ["Resistors ", "limit current."].map(|f| Ok(f.to_string()));
///
/// let outcome = session.run_turn(fragments, &mut view, &mut NoImages).unwrap();
/// assert_eq!(outcome, TurnOutcome::Text);
/// assert_eq!(view.0, ["Resistors limit current."]);
/// ```
#[derive(Debug)]
pub struct ChatSession {
    aggregator: StreamAggregator,
    svg: Svg,
    completed_turns: u64,
}

impl ChatSession {
    /// Creates a session rendering diagrams with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VoltchatError::Export`] when the render settings are invalid.
    pub fn new(config: AppConfig) -> Result<Self, VoltchatError> {
        let svg = ResponseRenderer::new(config).exporter()?;
        Ok(Self {
            aggregator: StreamAggregator::new(),
            svg,
            completed_turns: 0,
        })
    }

    /// Whether a turn is currently streaming.
    pub fn is_busy(&self) -> bool {
        self.aggregator.is_streaming()
    }

    /// Number of turns that ran to completion, failures included.
    pub fn completed_turns(&self) -> u64 {
        self.completed_turns
    }

    /// Runs one turn.
    ///
    /// Pulls every fragment from `source`, showing the accumulated text after
    /// each one. When the source ends, the reply is classified exactly once
    /// and shown as text, an image or a diagram. A transport error retracts
    /// the message and shows a failure notice; the session is then ready for
    /// the next turn.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::TurnInProgress`] when called while another turn
    /// is streaming.
    pub fn run_turn<S, V, G>(
        &mut self,
        source: S,
        view: &mut V,
        images: &mut G,
    ) -> Result<TurnOutcome, ChatError>
    where
        S: IntoIterator<Item = Result<String, TransportError>>,
        V: MessageView + ?Sized,
        G: ImageGenerator + ?Sized,
    {
        self.aggregator.begin()?;
        info!(turn = self.completed_turns + 1; "Turn started");

        for fragment in source {
            match fragment {
                Ok(fragment) => {
                    let text = self.aggregator.push(&fragment)?;
                    view.show_partial(text);
                }
                Err(err) => {
                    warn!(err:% = err; "Transport failed, retracting message");
                    self.aggregator.abort();
                    view.retract();
                    view.show_failure(FAILURE_NOTICE);
                    return Ok(self.complete(TurnOutcome::TransportFailed));
                }
            }
        }

        let (classification, _) = self.aggregator.finish()?;
        let outcome = match classification {
            Classification::PlainText(text) => {
                view.show_text(&text);
                TurnOutcome::Text
            }
            Classification::ImageDirective(prompt) => self.fulfil_image(&prompt, view, images),
            Classification::Diagram(diagram) => {
                view.show_diagram(&self.render(&diagram));
                TurnOutcome::Diagram
            }
        };
        Ok(self.complete(outcome))
    }

    fn fulfil_image<V, G>(&self, prompt: &str, view: &mut V, images: &mut G) -> TurnOutcome
    where
        V: MessageView + ?Sized,
        G: ImageGenerator + ?Sized,
    {
        view.show_loading(prompt);
        let result = images.generate(prompt);
        view.clear_loading();
        match result {
            Ok(image) => {
                view.show_image(&image);
                TurnOutcome::Image
            }
            Err(err) => {
                warn!(err:% = err, prompt = prompt; "Image generation failed");
                view.show_failure(FAILURE_NOTICE);
                TurnOutcome::ImageFailed
            }
        }
    }

    fn render(&self, diagram: &Diagram) -> String {
        self.svg.render(diagram).to_string()
    }

    fn complete(&mut self, outcome: TurnOutcome) -> TurnOutcome {
        self.completed_turns += 1;
        info!(turn = self.completed_turns, outcome:? = outcome; "Turn finished");
        outcome
    }
}
