//! Stroke settings for wires and symbol outlines.
//!
//! Diagrams use one solid stroke per diagram family; only color, width and
//! line caps vary. [`apply_stroke!`](crate::apply_stroke!) writes a
//! [`StrokeDefinition`] onto any SVG element.

use crate::color::Color;

/// How line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    /// Rounded cap, so wires meeting at a terminal join without gaps
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG `stroke-linecap` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// A solid stroke.
///
/// # Examples
///
/// ```
/// use voltchat_core::draw::{StrokeCap, StrokeDefinition};
/// use voltchat_core::color::Color;
///
/// let mut stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// stroke.set_cap(StrokeCap::Round);
/// assert_eq!(stroke.with_width(3.0).width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Returns a copy of this stroke with a different width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 2.0)
    }
}

/// Applies the attributes of a [`StrokeDefinition`] to an SVG element.
///
/// ```
/// use voltchat_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::default();
/// let line = voltchat_core::apply_stroke!(svg_element::Line::new(), &stroke);
/// assert!(line.to_string().contains("stroke-width"));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
    };
}
