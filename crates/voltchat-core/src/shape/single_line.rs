//! Symbols of the single-line family: generator, transformer, bus, breaker and load.

use crate::draw::Primitive;

/// Thickness of the bus bar.
const BUS_THICKNESS: f32 = 6.0;

pub(super) fn generator() -> Vec<Primitive> {
    vec![
        Primitive::circle((0.0, 0.0), 20.0, false),
        Primitive::polyline(&[
            (-12.0, 0.0),
            (-9.0, -5.0),
            (-6.0, -7.0),
            (-3.0, -5.0),
            (0.0, 0.0),
            (3.0, 5.0),
            (6.0, 7.0),
            (9.0, 5.0),
            (12.0, 0.0),
        ]),
        Primitive::line((0.0, 20.0), (0.0, 30.0)),
    ]
}

pub(super) fn transformer() -> Vec<Primitive> {
    vec![
        Primitive::line((0.0, -30.0), (0.0, -22.0)),
        Primitive::circle((0.0, -8.0), 14.0, false),
        Primitive::circle((0.0, 8.0), 14.0, false),
        Primitive::line((0.0, 22.0), (0.0, 30.0)),
    ]
}

/// A horizontal bar spanning `[-width/2, +width/2]`. A zero width yields a
/// degenerate, zero-length bar.
pub(super) fn bus(width: f32) -> Vec<Primitive> {
    let width = width.max(0.0);
    vec![Primitive::rect(
        (-width / 2.0, -BUS_THICKNESS / 2.0),
        (width, BUS_THICKNESS),
        true,
    )]
}

pub(super) fn breaker() -> Vec<Primitive> {
    vec![
        Primitive::line((-25.0, 0.0), (-10.0, 0.0)),
        Primitive::rect((-10.0, -10.0), (20.0, 20.0), false),
        Primitive::line((10.0, 0.0), (25.0, 0.0)),
    ]
}

pub(super) fn load() -> Vec<Primitive> {
    vec![
        Primitive::line((0.0, -25.0), (0.0, -5.0)),
        Primitive::polygon(&[(-10.0, -5.0), (10.0, -5.0), (0.0, 10.0)], true),
    ]
}
