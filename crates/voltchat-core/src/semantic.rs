//! Semantic diagram model types.
//!
//! These types represent a circuit diagram after it has been extracted from a
//! model reply and validated. A [`Diagram`] is immutable once built; it is
//! handed to a single render call and dropped afterwards.
//!
//! # Pipeline Position
//!
//! ```text
//! Model reply (streamed text)
//!     ↓ classify
//! JSON payload (bare or fenced)
//!     ↓ decode + validate
//! Semantic Model (these types)
//!     ↓ resolve terminals + render
//! SVG
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use thiserror::Error;

use crate::geometry::{Point, Size};

/// Default horizontal extent of a bus bar.
pub const DEFAULT_BUS_WIDTH: f32 = 100.0;

/// Errors raised when a diagram violates a geometric invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("diagram {dimension} must be positive, got {value}")]
    NonPositiveCanvas { dimension: &'static str, value: f32 },

    #[error("bus `{id}` has negative width {width}")]
    NegativeBusWidth { id: String, width: f32 },
}

/// Error returned when a component type name is not a known [`ComponentKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component type `{0}`")]
pub struct UnknownKindError(pub String);

/// The two diagram families. They are never mixed in one diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    /// Battery, resistor, LED and switch circuits
    #[default]
    Schematic,
    /// Power-system diagrams built from generators, transformers, buses, breakers and loads
    SingleLine,
}

impl DiagramKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Schematic => "schematic",
            Self::SingleLine => "single-line",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schematic" => Ok(Self::Schematic),
            "single-line" => Ok(Self::SingleLine),
            _ => Err(format!(
                "invalid diagram type `{s}`, valid values: schematic, single-line"
            )),
        }
    }
}

/// The closed set of component kinds.
///
/// Every kind has exactly one symbol and one terminal table in
/// [`crate::shape`]; both are exhaustive matches over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Battery,
    Resistor,
    Led,
    Switch,
    Generator,
    Transformer,
    Bus,
    Breaker,
    Load,
}

impl ComponentKind {
    /// All kinds, schematic family first.
    pub const ALL: [ComponentKind; 9] = [
        Self::Battery,
        Self::Resistor,
        Self::Led,
        Self::Switch,
        Self::Generator,
        Self::Transformer,
        Self::Bus,
        Self::Breaker,
        Self::Load,
    ];

    /// The wire-format name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Resistor => "resistor",
            Self::Led => "led",
            Self::Switch => "switch",
            Self::Generator => "generator",
            Self::Transformer => "transformer",
            Self::Bus => "bus",
            Self::Breaker => "breaker",
            Self::Load => "load",
        }
    }

    /// The diagram family this kind belongs to.
    pub fn family(self) -> DiagramKind {
        match self {
            Self::Battery | Self::Resistor | Self::Led | Self::Switch => DiagramKind::Schematic,
            Self::Generator | Self::Transformer | Self::Bus | Self::Breaker | Self::Load => {
                DiagramKind::SingleLine
            }
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// Open/closed state of toggling components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SwitchState {
    #[default]
    Open,
    Closed,
}

impl FromStr for SwitchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("invalid state `{s}`, valid values: open, closed")),
        }
    }
}

/// How connection endpoints naming an unknown terminal are resolved.
///
/// The names match external configuration strings.
///
/// - `Lenient` - fall back to the kind's default terminal (default)
/// - `Strict` - leave the endpoint unresolved so its wire is skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPolicy {
    #[default]
    Lenient,
    Strict,
}

impl FromStr for TerminalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "invalid terminal policy `{s}`, valid values: lenient, strict"
            )),
        }
    }
}

/// One symbolic element placed on the canvas.
///
/// # Examples
///
/// ```
/// # use voltchat_core::semantic::{Component, ComponentKind, SwitchState};
/// let sw = Component::new("s1", ComponentKind::Switch, 120.0, 80.0)
///     .with_label("S1")
///     .with_state(SwitchState::Closed);
/// assert_eq!(sw.kind(), Some(ComponentKind::Switch));
/// assert_eq!(sw.label(), "S1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: String,
    type_name: String,
    kind: Option<ComponentKind>,
    position: Point,
    label: String,
    state: SwitchState,
    width: f32,
}

impl Component {
    /// Creates a component of a known kind with an empty label.
    pub fn new(id: impl Into<String>, kind: ComponentKind, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            type_name: kind.name().to_string(),
            kind: Some(kind),
            position: Point::new(x, y),
            label: String::new(),
            state: SwitchState::default(),
            width: DEFAULT_BUS_WIDTH,
        }
    }

    /// Creates a component whose type name is not a known kind.
    ///
    /// Such components draw no symbol but still draw their label.
    pub fn unknown(id: impl Into<String>, type_name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            kind: None,
            position: Point::new(x, y),
            label: String::new(),
            state: SwitchState::default(),
            width: DEFAULT_BUS_WIDTH,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_state(mut self, state: SwitchState) -> Self {
        self.state = state;
        self
    }

    /// Sets the bar extent; only meaningful for buses.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The type name as it appeared in the payload.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The kind, or `None` for an unrecognised type name.
    pub fn kind(&self) -> Option<ComponentKind> {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// A `"<componentId>.<terminalName>"` reference.
///
/// The reference is split at the first `.`, so bus offsets with a fractional
/// part (`"bus1.-12.5"`) keep their full numeric literal. A reference without
/// a `.` names the component with an empty terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalRef {
    component_id: String,
    terminal: String,
}

impl TerminalRef {
    pub fn new(component_id: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            terminal: terminal.into(),
        }
    }

    /// Parses a compound reference string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use voltchat_core::semantic::TerminalRef;
    /// let r = TerminalRef::parse("bus1.-40");
    /// assert_eq!(r.component_id(), "bus1");
    /// assert_eq!(r.terminal(), "-40");
    /// ```
    pub fn parse(reference: &str) -> Self {
        match reference.split_once('.') {
            Some((id, terminal)) => Self::new(id, terminal),
            None => Self::new(reference, ""),
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn terminal(&self) -> &str {
        &self.terminal
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component_id, self.terminal)
    }
}

/// A straight wire between two terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: TerminalRef,
    to: TerminalRef,
}

impl Connection {
    pub fn new(from: TerminalRef, to: TerminalRef) -> Self {
        Self { from, to }
    }

    /// Builds a connection from two compound reference strings.
    pub fn parse(from: &str, to: &str) -> Self {
        Self::new(TerminalRef::parse(from), TerminalRef::parse(to))
    }

    pub fn from(&self) -> &TerminalRef {
        &self.from
    }

    pub fn to(&self) -> &TerminalRef {
        &self.to
    }
}

/// A complete circuit diagram: canvas extents, components and connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    kind: DiagramKind,
    size: Size,
    components: Vec<Component>,
    connections: Vec<Connection>,
}

impl Diagram {
    /// Creates a diagram, checking the geometric invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the canvas is not strictly positive or a
    /// bus has a negative width. References are not checked here; dangling
    /// references are tolerated and skipped at render time.
    pub fn new(
        kind: DiagramKind,
        size: Size,
        components: Vec<Component>,
        connections: Vec<Connection>,
    ) -> Result<Self, ModelError> {
        for (dimension, value) in [("width", size.width()), ("height", size.height())] {
            if value.is_nan() || value <= 0.0 {
                return Err(ModelError::NonPositiveCanvas { dimension, value });
            }
        }

        if let Some(bus) = components
            .iter()
            .find(|c| c.kind() == Some(ComponentKind::Bus) && c.width() < 0.0)
        {
            return Err(ModelError::NegativeBusWidth {
                id: bus.id().to_string(),
                width: bus.width(),
            });
        }

        Ok(Self {
            kind,
            size,
            components,
            connections,
        })
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Looks up a component by id. The first declaration wins on duplicates.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }
}
