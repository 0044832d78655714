//! Component labels.
//!
//! A [`Label`] is a single line of text drawn verbatim at a fixed offset below
//! its component. Labels are never measured or wrapped; layout fidelity is the
//! responsibility of the diagram author.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::Point,
};

/// Text style shared by all labels of a diagram.
///
/// # Examples
///
/// ```
/// # use voltchat_core::draw::LabelDefinition;
/// let mut style = LabelDefinition::default();
/// style.set_font_family("Helvetica");
/// style.set_font_size(14.0);
/// assert_eq!(style.font_size(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDefinition {
    font_family: String,
    font_size: f32,
    color: Color,
}

impl Default for LabelDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("Arial"),
            font_size: 12.0,
            color: Color::default(),
        }
    }
}

impl LabelDefinition {
    pub fn new(font_family: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_font_family(&mut self, font_family: &str) {
        self.font_family = font_family.to_string();
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// A label ready to be drawn, combining content with a shared [`LabelDefinition`].
#[derive(Debug, Clone)]
pub struct Label {
    definition: Rc<LabelDefinition>,
    content: String,
}

impl Label {
    pub fn new(definition: Rc<LabelDefinition>, content: impl Into<String>) -> Self {
        Self {
            definition,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Drawable for Label {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let text = svg_element::Text::new(self.content.as_str())
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("fill", self.definition.color().to_string())
            .set("fill-opacity", self.definition.color().alpha());
        output.add_to_layer(RenderLayer::Component, Box::new(text));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_renders_at_position() {
        let label = Label::new(Rc::new(LabelDefinition::default()), "V1");
        let output = label.render_to_layers(Point::new(50.0, 95.0));
        assert_eq!(output.layer_len(RenderLayer::Component), 1);

        let svg: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(svg.contains("x=\"50\""));
        assert!(svg.contains("y=\"95\""));
        assert!(svg.contains("V1"));
    }
}
