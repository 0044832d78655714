//! Vector primitives that symbols are assembled from.
//!
//! Primitives are expressed in local coordinates; the symbol that owns them
//! is translated to the component position as a whole.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{StrokeDefinition, SvgNode},
    geometry::{Point, Size},
};

/// A rotation of `degrees` around `pivot`, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    degrees: f32,
    pivot: Point,
}

impl Rotation {
    pub fn new(degrees: f32, pivot: Point) -> Self {
        Self { degrees, pivot }
    }

    pub fn degrees(self) -> f32 {
        self.degrees
    }

    pub fn pivot(self) -> Point {
        self.pivot
    }

    /// SVG `transform` attribute value for this rotation.
    pub fn to_svg_value(self) -> String {
        format!(
            "rotate({} {} {})",
            self.degrees,
            self.pivot.x(),
            self.pivot.y()
        )
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
    },
    Polyline(Vec<Point>),
    Polygon {
        points: Vec<Point>,
        filled: bool,
    },
    Circle {
        center: Point,
        radius: f32,
        filled: bool,
    },
    Rect {
        top_left: Point,
        size: Size,
        filled: bool,
    },
    /// A short text mark that is part of the symbol itself, such as `+` or `G`.
    Glyph {
        position: Point,
        text: String,
    },
    Rotated {
        rotation: Rotation,
        primitive: Box<Primitive>,
    },
}

impl Primitive {
    pub fn line(from: (f32, f32), to: (f32, f32)) -> Self {
        Self::Line {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
        }
    }

    pub fn polyline(points: &[(f32, f32)]) -> Self {
        Self::Polyline(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn polygon(points: &[(f32, f32)], filled: bool) -> Self {
        Self::Polygon {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            filled,
        }
    }

    pub fn circle(center: (f32, f32), radius: f32, filled: bool) -> Self {
        Self::Circle {
            center: Point::new(center.0, center.1),
            radius,
            filled,
        }
    }

    pub fn rect(top_left: (f32, f32), size: (f32, f32), filled: bool) -> Self {
        Self::Rect {
            top_left: Point::new(top_left.0, top_left.1),
            size: Size::new(size.0, size.1),
            filled,
        }
    }

    pub fn glyph(position: (f32, f32), text: impl Into<String>) -> Self {
        Self::Glyph {
            position: Point::new(position.0, position.1),
            text: text.into(),
        }
    }

    /// Wraps this primitive in a rotation.
    pub fn rotated(self, rotation: Rotation) -> Self {
        Self::Rotated {
            rotation,
            primitive: Box::new(self),
        }
    }

    /// Returns the rotation applied to this primitive, if any.
    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Self::Rotated { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }

    /// Renders this primitive to an SVG node in local coordinates.
    pub fn to_svg(&self, stroke: &StrokeDefinition) -> SvgNode {
        match self {
            Self::Line { from, to } => {
                let line = svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y());
                Box::new(apply_stroke!(line, stroke))
            }
            Self::Polyline(points) => {
                let polyline = svg_element::Polyline::new()
                    .set("points", points_attr(points))
                    .set("fill", "none");
                Box::new(apply_stroke!(polyline, stroke))
            }
            Self::Polygon { points, filled } => {
                let polygon = svg_element::Polygon::new()
                    .set("points", points_attr(points))
                    .set("fill", fill_attr(*filled, stroke));
                Box::new(apply_stroke!(polygon, stroke))
            }
            Self::Circle {
                center,
                radius,
                filled,
            } => {
                let circle = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius)
                    .set("fill", fill_attr(*filled, stroke));
                Box::new(apply_stroke!(circle, stroke))
            }
            Self::Rect {
                top_left,
                size,
                filled,
            } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", top_left.x())
                    .set("y", top_left.y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", fill_attr(*filled, stroke));
                Box::new(apply_stroke!(rect, stroke))
            }
            Self::Glyph { position, text } => Box::new(
                svg_element::Text::new(text.as_str())
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-size", 12)
                    .set("fill", stroke.color().to_string()),
            ),
            Self::Rotated {
                rotation,
                primitive,
            } => Box::new(
                svg_element::Group::new()
                    .set("transform", rotation.to_svg_value())
                    .add(primitive.to_svg(stroke)),
            ),
        }
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fill_attr(filled: bool, stroke: &StrokeDefinition) -> String {
    if filled {
        stroke.color().to_string()
    } else {
        "none".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_renders_endpoints() {
        let svg = Primitive::line((-30.0, 0.0), (30.0, 0.0))
            .to_svg(&StrokeDefinition::default())
            .to_string();
        assert!(svg.starts_with("<line"));
        assert!(svg.contains("x1=\"-30\""));
        assert!(svg.contains("x2=\"30\""));
    }

    #[test]
    fn test_polyline_points_attr() {
        let svg = Primitive::polyline(&[(0.0, 0.0), (5.0, -8.0), (10.0, 0.0)])
            .to_svg(&StrokeDefinition::default())
            .to_string();
        assert!(svg.contains("points=\"0,0 5,-8 10,0\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_rotated_wraps_in_group() {
        let rotation = Rotation::new(-30.0, Point::new(-15.0, 0.0));
        let primitive = Primitive::line((-15.0, 0.0), (15.0, 0.0)).rotated(rotation);

        assert_eq!(primitive.rotation(), Some(rotation));
        let svg = primitive.to_svg(&StrokeDefinition::default()).to_string();
        assert!(svg.contains("transform=\"rotate(-30 -15 0)\""));
    }

    #[test]
    fn test_filled_circle_uses_stroke_color() {
        let svg = Primitive::circle((0.0, 0.0), 3.0, true)
            .to_svg(&StrokeDefinition::default())
            .to_string();
        assert!(svg.contains("fill=\"black\""));
    }
}
