//! SVG rendering of circuit diagrams.
//!
//! Rendering is a pure function of the diagram and the renderer settings. The
//! canvas has exactly the declared size and nothing is laid out or moved:
//!
//! 1. the background, when one is configured
//! 2. every connection, in order, as a straight wire between its resolved
//!    terminals; a connection with an unresolvable end is skipped
//! 3. every component, in order, as its symbol followed by its label
//!
//! Wires and components go to separate [`RenderLayer`]s, so wires always
//! end up beneath symbols.

use std::{
    io::{self, Write as _},
    rc::Rc,
};

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use voltchat_core::{
    apply_stroke,
    color::Color,
    draw::{
        Drawable, Label, LabelDefinition, LayeredOutput, RenderLayer, StrokeCap, StrokeDefinition,
    },
    geometry::{Point, Size},
    semantic::{Component, Connection, Diagram, DiagramKind, TerminalPolicy},
    shape::Symbol,
};

use crate::{
    config::RenderConfig,
    export::{self, Exporter},
    terminal,
};

/// Offset of a component label from the component position.
pub const LABEL_OFFSET: (f32, f32) = (0.0, 45.0);

const SCHEMATIC_STROKE_WIDTH: f32 = 2.0;
const SINGLE_LINE_STROKE_WIDTH: f32 = 3.0;

/// Builder for [`Svg`] renderers.
///
/// # Examples
///
/// ```
/// # use voltchat::export::svg::SvgBuilder;
/// # use voltchat::config::RenderConfig;
/// # use voltchat::semantic::TerminalPolicy;
/// let svg = SvgBuilder::new()
///     .with_render_config(&RenderConfig::default().with_background_color("white"))
///     .with_terminal_policy(TerminalPolicy::Strict)
///     .build()
///     .unwrap();
/// # let _ = svg;
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder {
    render: RenderConfig,
    policy: TerminalPolicy,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_config(mut self, render: &RenderConfig) -> Self {
        self.render = render.clone();
        self
    }

    pub fn with_terminal_policy(mut self, policy: TerminalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = self
            .render
            .background_color()
            .map_err(export::Error::Render)?;
        let stroke_color = self.render.stroke_color().map_err(export::Error::Render)?;
        let label_color = self.render.label_color().map_err(export::Error::Render)?;

        let mut stroke = StrokeDefinition::solid(stroke_color, SCHEMATIC_STROKE_WIDTH);
        stroke.set_cap(StrokeCap::Round);
        let heavy_stroke = stroke.clone().with_width(SINGLE_LINE_STROKE_WIDTH);

        let label = LabelDefinition::new(
            self.render.font_family(),
            self.render.font_size(),
            label_color,
        );

        Ok(Svg {
            background,
            schematic_stroke: Rc::new(stroke),
            single_line_stroke: Rc::new(heavy_stroke),
            label: Rc::new(label),
            policy: self.policy,
        })
    }
}

/// A configured SVG renderer.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    schematic_stroke: Rc<StrokeDefinition>,
    single_line_stroke: Rc<StrokeDefinition>,
    label: Rc<LabelDefinition>,
    policy: TerminalPolicy,
}

impl Svg {
    /// Renders a diagram to an SVG document of the declared canvas size.
    pub fn render(&self, diagram: &Diagram) -> Document {
        let size = diagram.size();
        info!(
            diagram_kind = diagram.kind().name(),
            components = diagram.components().len(),
            connections = diagram.connections().len();
            "Rendering diagram"
        );

        let stroke = match diagram.kind() {
            DiagramKind::Schematic => &self.schematic_stroke,
            DiagramKind::SingleLine => &self.single_line_stroke,
        };

        let mut output = LayeredOutput::new();
        if let Some(background) = self.background {
            output.add_to_layer(RenderLayer::Background, self.render_background(size, background));
        }

        let mut wires = 0;
        for connection in diagram.connections() {
            if let Some(wire) = self.render_wire(diagram, connection, stroke) {
                output.add_to_layer(RenderLayer::Wire, wire);
                wires += 1;
            }
        }

        for component in diagram.components() {
            output.merge(self.render_component(component, stroke));
        }

        debug!(
            wires = wires,
            skipped = diagram.connections().len() - wires;
            "Diagram rendered"
        );

        output.render().into_iter().fold(
            Document::new()
                .set(
                    "viewBox",
                    format!("0 0 {} {}", size.width(), size.height()),
                )
                .set("width", size.width())
                .set("height", size.height()),
            |doc, node| doc.add(node),
        )
    }

    fn render_background(&self, size: Size, color: Color) -> Box<dyn svg::Node> {
        Box::new(
            svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        )
    }

    /// A straight wire between both ends, or `None` when either end does not resolve.
    fn render_wire(
        &self,
        diagram: &Diagram,
        connection: &Connection,
        stroke: &StrokeDefinition,
    ) -> Option<Box<dyn svg::Node>> {
        let from = terminal::resolve(diagram, connection.from(), self.policy);
        let to = terminal::resolve(diagram, connection.to(), self.policy);
        let (Some(from), Some(to)) = (from, to) else {
            debug!(
                from = connection.from().to_string(),
                to = connection.to().to_string();
                "Skipping connection with unresolved terminal"
            );
            return None;
        };

        let line = svg_element::Line::new()
            .set("data-from", connection.from().to_string())
            .set("data-to", connection.to().to_string())
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y());
        Some(Box::new(apply_stroke!(line, stroke)))
    }

    fn render_component(
        &self,
        component: &Component,
        stroke: &Rc<StrokeDefinition>,
    ) -> LayeredOutput {
        let position = component.position();
        let mut output = LayeredOutput::new();

        if let Some(mut symbol) = Symbol::for_component(component) {
            symbol.set_stroke(Rc::clone(stroke));
            output.merge(symbol.render_to_layers(position));
        }

        let label = Label::new(Rc::clone(&self.label), component.label());
        output.merge(
            label.render_to_layers(
                position.add_point(Point::new(LABEL_OFFSET.0, LABEL_OFFSET.1)),
            ),
        );
        output
    }
}

impl Exporter for Svg {
    fn export_diagram(
        &self,
        diagram: &Diagram,
        writer: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render(diagram);
        write!(writer, "{doc}").map_err(export::Error::Io)
    }
}
