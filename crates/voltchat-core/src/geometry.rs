//! Geometric primitives for diagram rendering.
//!
//! # Coordinate System
//!
//! Voltchat uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Component positions are canvas coordinates; symbol geometry and terminal
//! offsets are expressed in local coordinates centred on the component.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use voltchat_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(-30.0, 0.0);
///
/// let terminal = position.add_point(offset);
/// assert_eq!(terminal.x(), 70.0);
/// assert_eq!(terminal.y(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Rotates this point around `pivot` by `degrees`.
    ///
    /// Positive angles turn clockwise on screen because the Y-axis points
    /// down, matching SVG's `rotate()` transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use voltchat_core::geometry::Point;
    /// let tip = Point::new(10.0, 0.0).rotate_around(Point::default(), 90.0);
    /// assert!((tip.x() - 0.0).abs() < 1e-4);
    /// assert!((tip.y() - 10.0).abs() < 1e-4);
    /// ```
    pub fn rotate_around(self, pivot: Point, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rel = self.sub_point(pivot);
        Self {
            x: pivot.x + rel.x * cos - rel.y * sin,
            y: pivot.y + rel.x * sin + rel.y * cos,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Rotation never changes the distance to the pivot.
    fn check_rotation_preserves_distance(
        point: Point,
        pivot: Point,
        degrees: f32,
    ) -> Result<(), TestCaseError> {
        let before = point.sub_point(pivot);
        let after = point.rotate_around(pivot, degrees).sub_point(pivot);

        let d_before = before.x().hypot(before.y());
        let d_after = after.x().hypot(after.y());
        prop_assert!(
            approx_eq!(f32, d_before, d_after, epsilon = 0.05),
            "distance changed from {d_before} to {d_after}"
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn rotation_preserves_distance(point in point_strategy(), pivot in point_strategy(), degrees in -360.0f32..360.0) {
            check_rotation_preserves_distance(point, pivot, degrees)?;
        }
    }
}
