//! The symbol library.
//!
//! Maps every [`ComponentKind`] to a vector [`Symbol`] and to a
//! [`TerminalTable`] of named connection points. Both mappings are exhaustive
//! matches, so adding a kind fails to compile until it has a symbol and a
//! terminal table.
//!
//! All geometry is local: every symbol is centred on `(0, 0)` and terminal
//! offsets are relative to the component position.

use std::rc::Rc;

use log::{debug, trace};
use svg::node::element as svg_element;

use crate::{
    draw::{Drawable, LayeredOutput, Primitive, RenderLayer, StrokeDefinition},
    geometry::Point,
    semantic::{Component, ComponentKind, SwitchState},
};

mod schematic;
mod single_line;

pub use schematic::{SWITCH_PIVOT, switch_arm_angle};

/// A named terminal and its local offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terminal {
    name: &'static str,
    offset: (f32, f32),
}

impl Terminal {
    const fn new(name: &'static str, dx: f32, dy: f32) -> Self {
        Self {
            name,
            offset: (dx, dy),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset.0, self.offset.1)
    }
}

/// The connection points of one component kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalTable {
    /// Fixed named terminals; `default` indexes the terminal used for
    /// unmatched names.
    Named {
        terminals: &'static [Terminal],
        default: usize,
    },
    /// A single implicit terminal that answers to any name.
    Single(Terminal),
    /// Terminals addressed by a signed horizontal offset, as used by buses.
    HorizontalOffset,
}

const BATTERY: [Terminal; 2] = [
    Terminal::new("positive", 0.0, -20.0),
    Terminal::new("negative", 0.0, 20.0),
];
const RESISTOR: [Terminal; 2] = [Terminal::new("in", -30.0, 0.0), Terminal::new("out", 30.0, 0.0)];
const LED: [Terminal; 2] = [
    Terminal::new("anode", -25.0, 0.0),
    Terminal::new("cathode", 25.0, 0.0),
];
const SWITCH: [Terminal; 2] = [Terminal::new("in", -30.0, 0.0), Terminal::new("out", 30.0, 0.0)];
const TRANSFORMER: [Terminal; 2] = [
    Terminal::new("primary", 0.0, -30.0),
    Terminal::new("secondary", 0.0, 30.0),
];
const BREAKER: [Terminal; 2] = [Terminal::new("in", -25.0, 0.0), Terminal::new("out", 25.0, 0.0)];

/// Returns the terminal table for `kind`.
pub fn terminal_offsets(kind: ComponentKind) -> TerminalTable {
    match kind {
        ComponentKind::Battery => TerminalTable::Named {
            terminals: &BATTERY,
            default: 1,
        },
        ComponentKind::Resistor => TerminalTable::Named {
            terminals: &RESISTOR,
            default: 1,
        },
        ComponentKind::Led => TerminalTable::Named {
            terminals: &LED,
            default: 1,
        },
        ComponentKind::Switch => TerminalTable::Named {
            terminals: &SWITCH,
            default: 1,
        },
        ComponentKind::Generator => TerminalTable::Single(Terminal::new("", 0.0, 30.0)),
        ComponentKind::Transformer => TerminalTable::Named {
            terminals: &TRANSFORMER,
            default: 1,
        },
        ComponentKind::Bus => TerminalTable::HorizontalOffset,
        ComponentKind::Breaker => TerminalTable::Named {
            terminals: &BREAKER,
            default: 1,
        },
        ComponentKind::Load => TerminalTable::Single(Terminal::new("", 0.0, -25.0)),
    }
}

impl TerminalTable {
    /// Looks up the offset of a terminal name this table recognises.
    ///
    /// Returns `None` only for a [`TerminalTable::Named`] table that has no
    /// terminal called `name`. Single-terminal kinds accept any name, and a
    /// horizontal-offset table treats a name that is not a finite number as
    /// offset zero.
    pub fn offset(&self, name: &str) -> Option<Point> {
        match self {
            Self::Named { terminals, .. } => terminals
                .iter()
                .find(|terminal| terminal.name == name)
                .map(Terminal::offset),
            Self::Single(terminal) => Some(terminal.offset()),
            Self::HorizontalOffset => Some(Point::new(parse_offset(name).unwrap_or(0.0), 0.0)),
        }
    }

    /// The offset used when a name is not recognised.
    pub fn default_offset(&self) -> Point {
        match self {
            Self::Named { terminals, default } => terminals[*default].offset(),
            Self::Single(terminal) => terminal.offset(),
            Self::HorizontalOffset => Point::default(),
        }
    }

    /// The fixed terminal names of this table, empty for implicit and offset terminals.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let terminals: &'static [Terminal] = match self {
            Self::Named { terminals, .. } => *terminals,
            Self::Single(_) | Self::HorizontalOffset => &[],
        };
        terminals.iter().map(Terminal::name)
    }
}

/// Parses a bus terminal name as a horizontal offset.
///
/// Only finite numbers are accepted; `"inf"` and `"NaN"` are rejected.
pub fn parse_offset(name: &str) -> Option<f32> {
    name.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A vector symbol: kind-specific primitives centred on the local origin.
#[derive(Debug, Clone)]
pub struct Symbol {
    kind: ComponentKind,
    primitives: Vec<Primitive>,
    stroke: Rc<StrokeDefinition>,
}

impl Symbol {
    /// Builds the symbol for a component, or `None` when its kind is unknown.
    pub fn for_component(component: &Component) -> Option<Self> {
        let Some(kind) = component.kind() else {
            debug!(id = component.id(), type_name = component.type_name(); "No symbol for component type");
            return None;
        };
        Some(symbol_for(kind, component.state(), component.width()))
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The rotation angle of the switch arm, `None` for symbols without a moving part.
    pub fn arm_angle(&self) -> Option<f32> {
        self.primitives
            .iter()
            .find_map(Primitive::rotation)
            .map(|rotation| rotation.degrees())
    }

    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    pub fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>) {
        self.stroke = stroke;
    }
}

impl Drawable for Symbol {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut group = svg_element::Group::new()
            .set("data-kind", self.kind.name())
            .set(
                "transform",
                format!("translate({} {})", position.x(), position.y()),
            );
        for primitive in &self.primitives {
            group = group.add(primitive.to_svg(&self.stroke));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Component, Box::new(group));
        output
    }
}

/// Returns the symbol for `kind`.
///
/// `state` only affects [`ComponentKind::Switch`]; `bus_width` only affects
/// [`ComponentKind::Bus`].
pub fn symbol_for(kind: ComponentKind, state: SwitchState, bus_width: f32) -> Symbol {
    let primitives = match kind {
        ComponentKind::Battery => schematic::battery(),
        ComponentKind::Resistor => schematic::resistor(),
        ComponentKind::Led => schematic::led(),
        ComponentKind::Switch => schematic::switch(state),
        ComponentKind::Generator => single_line::generator(),
        ComponentKind::Transformer => single_line::transformer(),
        ComponentKind::Bus => single_line::bus(bus_width),
        ComponentKind::Breaker => single_line::breaker(),
        ComponentKind::Load => single_line::load(),
    };
    trace!(kind = kind.name(), primitives = primitives.len(); "Symbol built");

    Symbol {
        kind,
        primitives,
        stroke: Rc::new(StrokeDefinition::default()),
    }
}
