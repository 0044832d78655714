//! Symbols of the schematic family: battery, resistor, LED and switch.

use crate::{
    draw::{Primitive, Rotation},
    geometry::Point,
    semantic::SwitchState,
};

/// Local pivot of the switch arm: the `in`-side contact point.
pub const SWITCH_PIVOT: (f32, f32) = (-15.0, 0.0);

/// Rotation of the switch arm in degrees for the given state.
pub fn switch_arm_angle(state: SwitchState) -> f32 {
    match state {
        SwitchState::Open => -30.0,
        SwitchState::Closed => 0.0,
    }
}

pub(super) fn battery() -> Vec<Primitive> {
    vec![
        Primitive::line((0.0, -20.0), (0.0, -6.0)),
        // Long plate is the positive side
        Primitive::line((-15.0, -6.0), (15.0, -6.0)),
        Primitive::line((-8.0, 6.0), (8.0, 6.0)),
        Primitive::line((0.0, 6.0), (0.0, 20.0)),
        Primitive::glyph((12.0, -15.0), "+"),
    ]
}

pub(super) fn resistor() -> Vec<Primitive> {
    vec![Primitive::polyline(&[
        (-30.0, 0.0),
        (-20.0, 0.0),
        (-17.0, -8.0),
        (-10.0, 8.0),
        (-3.0, -8.0),
        (3.0, 8.0),
        (10.0, -8.0),
        (17.0, 8.0),
        (20.0, 0.0),
        (30.0, 0.0),
    ])]
}

pub(super) fn led() -> Vec<Primitive> {
    vec![
        Primitive::line((-25.0, 0.0), (-10.0, 0.0)),
        Primitive::polygon(&[(-10.0, -10.0), (-10.0, 10.0), (10.0, 0.0)], false),
        Primitive::line((10.0, -10.0), (10.0, 10.0)),
        Primitive::line((10.0, 0.0), (25.0, 0.0)),
        // Emission arrows
        Primitive::line((0.0, -12.0), (8.0, -20.0)),
        Primitive::polyline(&[(4.0, -20.0), (8.0, -20.0), (8.0, -16.0)]),
        Primitive::line((6.0, -8.0), (14.0, -16.0)),
        Primitive::polyline(&[(10.0, -16.0), (14.0, -16.0), (14.0, -12.0)]),
    ]
}

pub(super) fn switch(state: SwitchState) -> Vec<Primitive> {
    let pivot = Point::new(SWITCH_PIVOT.0, SWITCH_PIVOT.1);
    let arm = Primitive::line(SWITCH_PIVOT, (15.0, 0.0))
        .rotated(Rotation::new(switch_arm_angle(state), pivot));

    vec![
        Primitive::line((-30.0, 0.0), SWITCH_PIVOT),
        Primitive::line((15.0, 0.0), (30.0, 0.0)),
        Primitive::circle(SWITCH_PIVOT, 3.0, true),
        Primitive::circle((15.0, 0.0), 3.0, false),
        arm,
    ]
}
