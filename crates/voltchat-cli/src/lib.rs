//! CLI logic for the Voltchat reply renderer.
//!
//! A captured model reply is replayed line by line through a
//! [`ChatSession`], exactly as if it were streaming in. Text is printed,
//! image prompts are announced, and diagrams are written as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    iter,
};

use log::{debug, info, trace, warn};
use miette::GraphicalReportHandler;

use voltchat::{
    ResponseRenderer, VoltchatError,
    chat::{
        ChatSession, ImageError, ImageGenerator, ImagePayload, MessageView, TransportError,
        TurnOutcome,
    },
    config::AppConfig,
};

use error_adapter::Reportable;

/// Run the Voltchat CLI application
///
/// Replays the input file through a chat session and writes a rendered
/// diagram to the output path. With `--check`, only validates the diagram
/// payload and reports its diagnostics.
///
/// # Errors
///
/// Returns `VoltchatError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid render settings
/// - Unusable diagram payloads in `--check` mode
pub fn run(args: &Args) -> Result<(), VoltchatError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        check = args.check;
        "Processing reply"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    if args.check {
        return check(&args.input, app_config);
    }

    let file = File::open(&args.input)?;
    let fragments = line_fragments(BufReader::new(file));

    let mut session = ChatSession::new(app_config)?;
    let mut view = ConsoleView::default();
    let outcome = session.run_turn(fragments, &mut view, &mut NoImageBackend)?;
    debug!(outcome:?; "Reply replayed");

    if let Some(svg) = view.diagram {
        fs::write(&args.output, svg)?;
        info!(output_file = args.output; "SVG exported successfully");
    } else if outcome == TurnOutcome::Diagram {
        warn!("Diagram turn produced no SVG");
    }

    Ok(())
}

/// Validate the diagram carried by the reply at `input` without rendering it.
fn check(input: &str, app_config: AppConfig) -> Result<(), VoltchatError> {
    let reply = fs::read_to_string(input)?;
    let renderer = ResponseRenderer::new(app_config);

    // Invalid colors should fail a check as well.
    renderer.exporter()?;
    let parsed = renderer.parse(&reply)?;

    let reporter = GraphicalReportHandler::new();
    for warning in parsed.warnings() {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &Reportable::diagnostic(warning, &reply))
            .map_err(|_| io::Error::other("failed to format diagnostic"))?;
        warn!("{writer}");
    }

    let diagram = parsed.diagram();
    info!(
        kind = diagram.kind().name(),
        components = diagram.components().len(),
        connections = diagram.connections().len(),
        warnings = parsed.warnings().len();
        "Diagram payload is valid"
    );

    Ok(())
}

/// Streams `reader` one line at a time, line terminators included, so the
/// fragments concatenate back to the exact input.
fn line_fragments<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = Result<String, TransportError>> {
    iter::from_fn(move || {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(TransportError::new(err.to_string()))),
        }
    })
}

/// Writes the turn to the terminal and keeps a rendered diagram for the caller.
#[derive(Debug, Default)]
struct ConsoleView {
    diagram: Option<String>,
}

impl MessageView for ConsoleView {
    fn show_partial(&mut self, text: &str) {
        trace!(bytes = text.len(); "Partial reply");
    }

    fn show_text(&mut self, text: &str) {
        print!("{text}");
    }

    fn show_loading(&mut self, prompt: &str) {
        println!("Generating image: {prompt}");
    }

    fn clear_loading(&mut self) {}

    fn show_image(&mut self, image: &ImagePayload) {
        info!(media_type = image.media_type(), bytes = image.bytes().len(); "Image received");
    }

    fn show_diagram(&mut self, svg: &str) {
        self.diagram = Some(svg.to_string());
    }

    fn show_failure(&mut self, notice: &str) {
        eprintln!("{notice}");
    }

    fn retract(&mut self) {
        self.diagram = None;
    }
}

/// The CLI has no image service.
struct NoImageBackend;

impl ImageGenerator for NoImageBackend {
    fn generate(&mut self, _prompt: &str) -> Result<ImagePayload, ImageError> {
        Err(ImageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_line_fragments_keep_terminators() {
        let reply = "first line\r\nsecond line\n\nno trailing newline";
        let fragments: Vec<_> = line_fragments(Cursor::new(reply))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            fragments,
            ["first line\r\n", "second line\n", "\n", "no trailing newline"]
        );
        assert_eq!(fragments.concat(), reply);
    }

    #[test]
    fn test_line_fragments_report_invalid_utf8() {
        let mut fragments = line_fragments(Cursor::new(b"ok\n\xff\xfe\n".to_vec()));

        assert_eq!(fragments.next().unwrap().unwrap(), "ok\n");
        assert!(fragments.next().unwrap().is_err());
    }

    #[test]
    fn test_console_view_keeps_only_live_diagram() {
        let mut view = ConsoleView::default();
        view.show_diagram("<svg/>");
        assert_eq!(view.diagram.as_deref(), Some("<svg/>"));

        view.retract();
        assert!(view.diagram.is_none());
    }
}
