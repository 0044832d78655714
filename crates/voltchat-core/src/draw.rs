//! Drawable building blocks for diagram rendering.
//!
//! Everything that ends up in the SVG output implements [`Drawable`], which
//! renders into a [`LayeredOutput`] at a given position. Layers keep wires
//! beneath component symbols no matter in which order drawables are merged.

mod label;
mod layer;
mod primitive;
mod stroke;

pub use label::{Label, LabelDefinition};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use primitive::{Primitive, Rotation};
pub use stroke::{StrokeCap, StrokeDefinition};

use crate::geometry::Point;

/// A renderable element that produces SVG nodes at a position.
pub trait Drawable: std::fmt::Debug {
    /// Render this drawable with its local origin placed at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
