//! Voltchat - renders chat-model replies as text, images or circuit diagrams.
//!
//! A reply streamed from a chat model is accumulated, classified once it is
//! complete, and shown as plain text, handed to an image generator, or
//! rendered as an SVG schematic or single-line diagram.

pub mod chat;
pub mod config;
pub mod export;
pub mod terminal;

mod error;

pub use voltchat_core::{color, draw, geometry, semantic, shape};
pub use voltchat_parser::{Classification, ParsedDiagram, error as diagnostics};

pub use error::VoltchatError;

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::{Svg, SvgBuilder};
use voltchat_parser::error::Diagnostic;

/// Builder-style entry point for classifying and rendering single replies.
///
/// # Examples
///
/// ```rust
/// use voltchat::{ResponseRenderer, config::AppConfig};
///
/// let reply = r#"```json
/// {"width":200,"height":100,
///  "components":[{"id":"b1","type":"battery","x":50,"y":50,"label":"V1"}],
///  "connections":[]}
/// ```"#;
///
/// let renderer = ResponseRenderer::new(AppConfig::default());
/// let parsed = renderer.parse(reply).expect("Failed to parse");
/// let svg = renderer.render_svg(parsed.diagram()).expect("Failed to render");
/// assert!(svg.contains("V1"));
/// ```
#[derive(Debug, Default)]
pub struct ResponseRenderer {
    config: AppConfig,
}

impl ResponseRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Classify a completed reply.
    ///
    /// Never fails: anything that is not a valid image directive or diagram
    /// is returned as [`Classification::PlainText`] with the reply unchanged.
    /// The diagnostics explain fallbacks and tolerated problems.
    pub fn classify(&self, reply: &str) -> (Classification, Vec<Diagnostic>) {
        voltchat_parser::classify_with_diagnostics(reply)
    }

    /// Extract and validate the diagram carried by a reply.
    ///
    /// # Errors
    ///
    /// Returns [`VoltchatError::Parse`] when the reply carries no usable
    /// diagram.
    pub fn parse(&self, reply: &str) -> Result<ParsedDiagram, VoltchatError> {
        info!("Parsing diagram reply");
        let parsed = voltchat_parser::parse_diagram(reply)
            .map_err(|err| VoltchatError::new_parse_error(err, reply))?;

        debug!(warnings = parsed.warnings().len(); "Diagram parsed successfully");
        trace!(diagram:? = parsed.diagram(); "Parsed diagram");
        Ok(parsed)
    }

    /// Build an SVG renderer from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VoltchatError::Export`] when a configured color is invalid.
    pub fn exporter(&self) -> Result<Svg, VoltchatError> {
        let svg = SvgBuilder::new()
            .with_render_config(self.config.render())
            .with_terminal_policy(self.config.terminals().policy())
            .build()?;
        Ok(svg)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`VoltchatError::Export`] when a configured color is invalid.
    pub fn render_svg(&self, diagram: &semantic::Diagram) -> Result<String, VoltchatError> {
        let svg = self.exporter()?.render(diagram).to_string();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
