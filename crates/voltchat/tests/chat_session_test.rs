//! Integration tests for ChatSession turn handling

use voltchat::{
    chat::{
        ChatError, ChatSession, FAILURE_NOTICE, ImageError, ImageGenerator, ImagePayload,
        MessageView, StreamAggregator, TransportError, TurnOutcome,
    },
    config::AppConfig,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Partial(String),
    Text(String),
    Loading(String),
    ClearLoading,
    Image(String),
    Diagram(String),
    Failure(String),
    Retract,
}

#[derive(Default)]
struct RecordingView {
    events: Vec<Event>,
}

impl MessageView for RecordingView {
    fn show_partial(&mut self, text: &str) {
        self.events.push(Event::Partial(text.to_string()));
    }

    fn show_text(&mut self, text: &str) {
        self.events.push(Event::Text(text.to_string()));
    }

    fn show_loading(&mut self, prompt: &str) {
        self.events.push(Event::Loading(prompt.to_string()));
    }

    fn clear_loading(&mut self) {
        self.events.push(Event::ClearLoading);
    }

    fn show_image(&mut self, image: &ImagePayload) {
        self.events.push(Event::Image(image.media_type().to_string()));
    }

    fn show_diagram(&mut self, svg: &str) {
        self.events.push(Event::Diagram(svg.to_string()));
    }

    fn show_failure(&mut self, notice: &str) {
        self.events.push(Event::Failure(notice.to_string()));
    }

    fn retract(&mut self) {
        self.events.push(Event::Retract);
    }
}

struct FakeImages {
    result: Result<ImagePayload, ImageError>,
    prompts: Vec<String>,
}

impl FakeImages {
    fn succeeding() -> Self {
        Self {
            result: Ok(ImagePayload::new("image/png", vec![0x89, b'P', b'N', b'G'])),
            prompts: Vec::new(),
        }
    }

    fn failing() -> Self {
        Self {
            result: Err(ImageError::Failed("quota exceeded".to_string())),
            prompts: Vec::new(),
        }
    }
}

impl ImageGenerator for FakeImages {
    fn generate(&mut self, prompt: &str) -> Result<ImagePayload, ImageError> {
        self.prompts.push(prompt.to_string());
        self.result.clone()
    }
}

fn fragments(parts: &[&str]) -> Vec<Result<String, TransportError>> {
    parts.iter().map(|part| Ok(part.to_string())).collect()
}

fn session() -> ChatSession {
    ChatSession::new(AppConfig::default()).expect("default config is valid")
}

#[test]
fn test_text_turn_shows_partials_then_text() {
    let mut session = session();
    let mut view = RecordingView::default();

    let outcome = session
        .run_turn(
            fragments(&["Ohm's ", "law"]),
            &mut view,
            &mut FakeImages::succeeding(),
        )
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Text);
    assert_eq!(
        view.events,
        vec![
            Event::Partial("Ohm's ".to_string()),
            Event::Partial("Ohm's law".to_string()),
            Event::Text("Ohm's law".to_string()),
        ]
    );
    assert!(!session.is_busy());
    assert_eq!(session.completed_turns(), 1);
}

#[test]
fn test_image_turn_generates_after_classification() {
    let mut session = session();
    let mut view = RecordingView::default();
    let mut images = FakeImages::succeeding();

    let outcome = session
        .run_turn(
            fragments(&[r#"{"action":"generate_image","#, r#""prompt":"a red barn"}"#]),
            &mut view,
            &mut images,
        )
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Image);
    assert_eq!(images.prompts, vec!["a red barn".to_string()]);
    assert_eq!(
        view.events[2..],
        [
            Event::Loading("a red barn".to_string()),
            Event::ClearLoading,
            Event::Image("image/png".to_string()),
        ]
    );
}

#[test]
fn test_image_failure_clears_loading_and_shows_notice() {
    let mut session = session();
    let mut view = RecordingView::default();

    let outcome = session
        .run_turn(
            fragments(&[r#"{"action":"generate_image","prompt":"a fox"}"#]),
            &mut view,
            &mut FakeImages::failing(),
        )
        .unwrap();

    assert_eq!(outcome, TurnOutcome::ImageFailed);
    assert_eq!(
        view.events[1..],
        [
            Event::Loading("a fox".to_string()),
            Event::ClearLoading,
            Event::Failure(FAILURE_NOTICE.to_string()),
        ]
    );
}

#[test]
fn test_diagram_turn_renders_svg() {
    let mut session = session();
    let mut view = RecordingView::default();
    let reply = [
        "Sure, here it is:\n```json\n",
        r#"{"width":200,"height":100,"components":[{"id":"b1","type":"battery","x":50,"y":50,"label":"V1"}],"connections":[]}"#,
        "\n```\n",
    ];

    let outcome = session
        .run_turn(fragments(&reply), &mut view, &mut FakeImages::succeeding())
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Diagram);
    let Some(Event::Diagram(svg)) = view.events.last() else {
        panic!("expected a diagram, got {:?}", view.events.last());
    };
    assert!(svg.contains("<svg"));
    assert!(svg.contains("V1"));
}

#[test]
fn test_transport_error_retracts_and_session_recovers() {
    let mut session = session();
    let mut view = RecordingView::default();
    let source = vec![
        Ok("Partial ans".to_string()),
        Err(TransportError::new("connection reset")),
        Ok("never seen".to_string()),
    ];

    let outcome = session
        .run_turn(source, &mut view, &mut FakeImages::succeeding())
        .unwrap();

    assert_eq!(outcome, TurnOutcome::TransportFailed);
    assert_eq!(
        view.events,
        vec![
            Event::Partial("Partial ans".to_string()),
            Event::Retract,
            Event::Failure(FAILURE_NOTICE.to_string()),
        ]
    );
    assert!(!session.is_busy());

    let mut next_view = RecordingView::default();
    let outcome = session
        .run_turn(
            fragments(&["fresh"]),
            &mut next_view,
            &mut FakeImages::succeeding(),
        )
        .unwrap();
    assert_eq!(outcome, TurnOutcome::Text);
    assert_eq!(next_view.events.last(), Some(&Event::Text("fresh".to_string())));
    assert_eq!(session.completed_turns(), 2);
}

#[test]
fn test_broken_diagram_falls_back_to_text() {
    let mut session = session();
    let mut view = RecordingView::default();
    let reply = r#"{"width":-1,"height":100,"components":[],"connections":[]}"#;

    let outcome = session
        .run_turn(fragments(&[reply]), &mut view, &mut FakeImages::succeeding())
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Text);
    assert_eq!(view.events.last(), Some(&Event::Text(reply.to_string())));
}

#[test]
fn test_empty_stream_shows_empty_text() {
    let mut session = session();
    let mut view = RecordingView::default();

    let outcome = session
        .run_turn(Vec::new(), &mut view, &mut FakeImages::succeeding())
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Text);
    assert_eq!(view.events, vec![Event::Text(String::new())]);
}

#[test]
fn test_aggregator_rejects_overlapping_turns() {
    let mut aggregator = StreamAggregator::new();
    aggregator.begin().unwrap();
    assert_eq!(aggregator.begin(), Err(ChatError::TurnInProgress));
}
