//! Classification of a completed model reply.
//!
//! A reply is plain prose, a request to generate an image, or a diagram. The
//! structured forms are JSON, either as the whole reply or inside a
//! ```` ```json ```` fence. Whatever cannot be interpreted is shown as text,
//! so classification never fails and never loses the reply.

use log::{debug, info, trace};
use serde::Deserialize;
use serde_json::Value;

use voltchat_core::semantic::Diagram;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    fence,
    span::Span,
    validate::{ParsedDiagram, build_diagram},
    wire::{DiagramWire, ImageDirectiveWire},
};

/// What a completed reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Show the reply as text. Carries the original reply unchanged.
    PlainText(String),
    /// Generate an image from this prompt.
    ImageDirective(String),
    /// Render this diagram.
    Diagram(Diagram),
}

impl Classification {
    /// Short name of the outcome, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainText(_) => "plain-text",
            Self::ImageDirective(_) => "image-directive",
            Self::Diagram(_) => "diagram",
        }
    }
}

/// Classifies a completed reply.
///
/// # Examples
///
/// ```
/// # use voltchat_parser::{Classification, classify};
/// let reply = r#"{"action":"generate_image","prompt":"a red barn"}"#;
/// assert_eq!(classify(reply), Classification::ImageDirective("a red barn".into()));
///
/// let prose = "Ohm's law relates voltage, current and resistance.";
/// assert_eq!(classify(prose), Classification::PlainText(prose.into()));
/// ```
pub fn classify(reply: &str) -> Classification {
    classify_with_diagnostics(reply).0
}

/// Classifies a completed reply and returns every diagnostic raised on the way.
///
/// Diagnostics explain a plain-text fallback (bad JSON in a fence, a broken
/// diagram) or list what was tolerated in an accepted diagram. A reply with
/// no JSON anywhere yields no diagnostics.
pub fn classify_with_diagnostics(reply: &str) -> (Classification, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let classification = match extract_payload(reply) {
        Ok(Some(value)) => interpret(&value, &mut diagnostics),
        Ok(None) => None,
        Err(err) => {
            diagnostics.extend(err.into_diagnostics());
            None
        }
    }
    .unwrap_or_else(|| Classification::PlainText(reply.to_string()));

    info!(
        outcome = classification.name(),
        diagnostics = diagnostics.len();
        "Reply classified"
    );
    (classification, diagnostics)
}

/// Extracts and validates the diagram payload of a reply.
///
/// Unlike [`classify`], which falls back to plain text, this reports why a
/// reply is not a usable diagram.
///
/// # Errors
///
/// Returns a [`ParseError`] when no JSON can be extracted, the JSON is not
/// diagram-shaped, or the diagram fails validation.
pub fn parse_diagram(reply: &str) -> Result<ParsedDiagram, ParseError> {
    let value = extract_payload(reply)?.ok_or_else(|| {
        Diagnostic::error("reply contains no JSON payload")
            .with_code(ErrorCode::E101)
            .with_help("a diagram is a JSON object, optionally wrapped in a ```json fence")
    })?;
    decode_diagram(&value)?.ok_or_else(|| {
        Diagnostic::error("payload is not a diagram")
            .with_code(ErrorCode::E101)
            .with_help("a diagram needs both `components` and `connections` fields")
            .into()
    })
}

/// Finds the JSON value a reply carries.
///
/// The whole reply is tried first, then the first fenced block. `Ok(None)`
/// means there is nothing JSON-like to report on; an error means a fenced
/// block was found but its content is not valid JSON.
fn extract_payload(reply: &str) -> Result<Option<Value>, ParseError> {
    if let Ok(value) = serde_json::from_str::<Value>(reply) {
        debug!("Reply is a bare JSON value");
        return Ok(Some(value));
    }

    let Some(block) = fence::find_json_block(reply) else {
        debug!("Reply has no fenced JSON block");
        return Ok(None);
    };
    trace!(offset = block.offset(), content = block.content(); "Found fenced JSON block");

    serde_json::from_str::<Value>(block.content())
        .map(Some)
        .map_err(|err| syntax_error(&err, block.content()).shifted(block.offset()).into())
}

fn syntax_error(err: &serde_json::Error, text: &str) -> Diagnostic {
    let span = Span::from_line_column(text, err.line(), err.column());
    let message = if err.is_eof() {
        "unexpected end of JSON"
    } else {
        "invalid JSON"
    };
    Diagnostic::error(format!("{message}: {err}"))
        .with_code(ErrorCode::E100)
        .with_label(span, message)
}

/// Decodes a diagram-shaped value. `Ok(None)` when the value is not shaped
/// like a diagram.
fn decode_diagram(value: &Value) -> Result<Option<ParsedDiagram>, ParseError> {
    if !DiagramWire::is_diagram_shaped(value) {
        return Ok(None);
    }
    let wire = DiagramWire::deserialize(value).map_err(|err| {
        Diagnostic::error(format!("malformed diagram: {err}"))
            .with_code(ErrorCode::E201)
            .with_help("check the field types against the diagram format")
    })?;
    build_diagram(wire).map(Some)
}

fn interpret(value: &Value, diagnostics: &mut Vec<Diagnostic>) -> Option<Classification> {
    if let Some(directive) = ImageDirectiveWire::from_value(value) {
        return Some(Classification::ImageDirective(directive.into_prompt()));
    }

    match decode_diagram(value) {
        Ok(Some(parsed)) => {
            let (diagram, warnings) = parsed.into_parts();
            diagnostics.extend(warnings);
            Some(Classification::Diagram(diagram))
        }
        Ok(None) => {
            debug!("JSON payload matches no known shape");
            None
        }
        Err(err) => {
            diagnostics.extend(err.into_diagnostics());
            None
        }
    }
}
