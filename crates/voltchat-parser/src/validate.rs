//! Structural validation of a diagram payload.
//!
//! Turns a [`DiagramWire`] into a semantic [`Diagram`], collecting every
//! problem on the way. Missing required component fields and broken geometry
//! are errors; anything the renderer can draw around is a warning, including a
//! malformed connection, which is dropped on its own.

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use voltchat_core::{
    geometry::Size,
    semantic::{
        Component, ComponentKind, Connection, Diagram, DiagramKind, ModelError, SwitchState,
        TerminalRef,
    },
    shape::{TerminalTable, parse_offset, terminal_offsets},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    wire::{ComponentWire, ConnectionWire, DiagramWire},
};

/// A diagram that passed validation, with the warnings it raised.
#[derive(Debug, Clone)]
pub struct ParsedDiagram {
    diagram: Diagram,
    warnings: Vec<Diagnostic>,
}

impl ParsedDiagram {
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Diagram, Vec<Diagnostic>) {
        (self.diagram, self.warnings)
    }
}

/// Validates a decoded payload and builds the diagram.
pub(crate) fn build_diagram(wire: DiagramWire) -> Result<ParsedDiagram, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let kind = diagram_kind(wire.diagram_type.as_deref(), &mut collector);
    let width = canvas_dimension("width", wire.width, &mut collector);
    let height = canvas_dimension("height", wire.height, &mut collector);

    let mut components = Vec::with_capacity(wire.components.len());
    let mut first_index: IndexMap<String, usize> = IndexMap::new();
    for (index, component) in wire.components.into_iter().enumerate() {
        let Some(component) = build_component(index, component, kind, &mut collector) else {
            continue;
        };
        if first_index.contains_key(component.id()) {
            collector.emit(
                Diagnostic::warning(format!(
                    "component id `{}` is declared more than once",
                    component.id()
                ))
                .with_code(ErrorCode::E302)
                .with_help(format!(
                    "connections use the first declaration; components[{index}] is only drawn"
                )),
            );
        } else {
            first_index.insert(component.id().to_string(), components.len());
        }
        components.push(component);
    }

    let mut connections = Vec::with_capacity(wire.connections.len());
    for (index, connection) in wire.connections.iter().enumerate() {
        let Some(connection) = build_connection(index, connection, &mut collector) else {
            continue;
        };
        for end in [connection.from(), connection.to()] {
            check_reference(end, &components, &first_index, &mut collector);
        }
        connections.push(connection);
    }

    let warnings = collector.finish()?;

    let diagram = Diagram::new(kind, Size::new(width, height), components, connections)
        .map_err(|err| {
            let code = match err {
                ModelError::NonPositiveCanvas { .. } => ErrorCode::E202,
                ModelError::NegativeBusWidth { .. } => ErrorCode::E203,
            };
            let mut diagnostics = warnings.clone();
            diagnostics.push(Diagnostic::error(err.to_string()).with_code(code));
            ParseError::new(diagnostics)
        })?;

    debug!(
        components = diagram.components().len(),
        connections = diagram.connections().len(),
        warnings = warnings.len();
        "Diagram payload validated"
    );
    Ok(ParsedDiagram { diagram, warnings })
}

fn diagram_kind(declared: Option<&str>, collector: &mut DiagnosticCollector) -> DiagramKind {
    let Some(declared) = declared else {
        return DiagramKind::default();
    };
    declared.parse().unwrap_or_else(|_| {
        collector.emit(
            Diagnostic::warning(format!("unknown diagram type `{declared}`"))
                .with_code(ErrorCode::E306)
                .with_help("valid values are `schematic` and `single-line`; `schematic` is used"),
        );
        DiagramKind::default()
    })
}

fn canvas_dimension(
    name: &'static str,
    value: Option<f64>,
    collector: &mut DiagnosticCollector,
) -> f32 {
    let Some(value) = value else {
        collector.emit(
            Diagnostic::error(format!("diagram is missing `{name}`"))
                .with_code(ErrorCode::E200)
                .with_help("the canvas needs a positive `width` and `height`"),
        );
        return 0.0;
    };
    let narrowed = value as f32;
    if value <= 0.0 {
        collector.emit(
            Diagnostic::error(format!("diagram {name} must be positive, got {value}"))
                .with_code(ErrorCode::E202),
        );
    } else if !narrowed.is_normal() {
        collector.emit(
            Diagnostic::error(format!("diagram {name} {value} is out of range"))
                .with_code(ErrorCode::E202)
                .with_help(format!(
                    "canvas sizes must lie between {} and {}",
                    f32::MIN_POSITIVE,
                    f32::MAX
                )),
        );
    }
    narrowed
}

/// Reads a required field, reporting it when absent.
fn required<T>(
    value: Option<T>,
    path: impl FnOnce() -> String,
    collector: &mut DiagnosticCollector,
) -> Option<T> {
    if value.is_none() {
        collector.emit(
            Diagnostic::error(format!("missing required field `{}`", path()))
                .with_code(ErrorCode::E200),
        );
    }
    value
}

fn coordinate(
    value: Option<f64>,
    path: impl Fn() -> String,
    collector: &mut DiagnosticCollector,
) -> Option<f32> {
    let value = required(value, &path, collector)? as f32;
    if !value.is_finite() {
        collector.emit(
            Diagnostic::error(format!("`{}` is not a finite number", path()))
                .with_code(ErrorCode::E201),
        );
        return None;
    }
    Some(value)
}

fn build_component(
    index: usize,
    wire: ComponentWire,
    diagram_kind: DiagramKind,
    collector: &mut DiagnosticCollector,
) -> Option<Component> {
    let path = |field: &str| format!("components[{index}].{field}");

    let id = required(wire.id, || path("id"), collector);
    let type_name = required(wire.type_name, || path("type"), collector);
    let x = coordinate(wire.x, || path("x"), collector);
    let y = coordinate(wire.y, || path("y"), collector);
    let (id, type_name, x, y) = (id?, type_name?, x?, y?);

    let component = match type_name.parse::<ComponentKind>() {
        Ok(kind) => {
            if kind.family() != diagram_kind {
                collector.emit(
                    Diagnostic::warning(format!(
                        "{kind} `{id}` belongs to {} diagrams, but this diagram is {diagram_kind}",
                        kind.family()
                    ))
                    .with_code(ErrorCode::E305),
                );
            }
            Component::new(id, kind, x, y)
        }
        Err(err) => {
            collector.emit(
                Diagnostic::warning(format!("{err} for component `{id}`"))
                    .with_code(ErrorCode::E303)
                    .with_help(format!(
                        "no symbol is drawn; known types are {}",
                        quoted_list(ComponentKind::ALL.iter().map(|kind| kind.name()))
                    )),
            );
            Component::unknown(id, type_name, x, y)
        }
    };

    let label = wire.label.and_then(|label| {
        lenient_string(label, || path("label"), "the label is left empty", collector)
    });
    let mut component = component.with_label(label.unwrap_or_default());

    let state = wire.state.and_then(|state| {
        lenient_string(state, || path("state"), "the switch is drawn open", collector)
    });
    if let Some(state) = state {
        match state.parse::<SwitchState>() {
            Ok(state) => component = component.with_state(state),
            Err(err) => collector.emit(
                Diagnostic::warning(format!("component `{}`: {err}", component.id()))
                    .with_code(ErrorCode::E304)
                    .with_help("the switch is drawn open"),
            ),
        }
    }

    if let Some(width) = wire.width.filter(|_| component.kind() == Some(ComponentKind::Bus)) {
        let width = width as f32;
        if !width.is_finite() {
            collector.emit(
                Diagnostic::error(format!("`{}` is not a finite number", path("width")))
                    .with_code(ErrorCode::E201),
            );
            return None;
        }
        if width < 0.0 {
            collector.emit(
                Diagnostic::error(format!(
                    "bus `{}` has negative width {width}",
                    component.id()
                ))
                .with_code(ErrorCode::E203),
            );
        }
        component = component.with_width(width);
    }

    Some(component)
}

/// Builds one connection. A malformed entry is reported and dropped without
/// affecting the rest of the diagram.
fn build_connection(
    index: usize,
    value: &Value,
    collector: &mut DiagnosticCollector,
) -> Option<Connection> {
    let Some(wire) = ConnectionWire::from_value(value) else {
        collector.emit(
            Diagnostic::warning(format!(
                "`connections[{index}]` should be an object, got {}",
                json_kind(value)
            ))
            .with_code(ErrorCode::E201)
            .with_help(DROPPED_CONNECTION),
        );
        return None;
    };
    let path = |field: &str| format!("connections[{index}].{field}");
    let from = endpoint(wire.from, || path("from"), collector);
    let to = endpoint(wire.to, || path("to"), collector);
    Some(Connection::parse(&from?, &to?))
}

const DROPPED_CONNECTION: &str = "this connection is not drawn";

fn endpoint(
    value: Option<Value>,
    path: impl Fn() -> String,
    collector: &mut DiagnosticCollector,
) -> Option<String> {
    let Some(value) = value else {
        collector.emit(
            Diagnostic::warning(format!("missing required field `{}`", path()))
                .with_code(ErrorCode::E200)
                .with_help(DROPPED_CONNECTION),
        );
        return None;
    };
    lenient_string(value, path, DROPPED_CONNECTION, collector)
}

/// Reads a field that should be a string, warning with `fallback` as help
/// when it is not.
fn lenient_string(
    value: Value,
    path: impl Fn() -> String,
    fallback: &str,
    collector: &mut DiagnosticCollector,
) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        other => {
            collector.emit(
                Diagnostic::warning(format!(
                    "`{}` should be a string, got {}",
                    path(),
                    json_kind(&other)
                ))
                .with_code(ErrorCode::E201)
                .with_help(fallback),
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn check_reference(
    reference: &TerminalRef,
    components: &[Component],
    first_index: &IndexMap<String, usize>,
    collector: &mut DiagnosticCollector,
) {
    let Some(component) = first_index
        .get(reference.component_id())
        .and_then(|&index| components.get(index))
    else {
        collector.emit(
            Diagnostic::warning(format!(
                "connection references unknown component `{}`",
                reference.component_id()
            ))
            .with_code(ErrorCode::E300)
            .with_help("this connection is not drawn"),
        );
        return;
    };

    let Some(kind) = component.kind() else {
        return;
    };
    let table = terminal_offsets(kind);
    match &table {
        TerminalTable::Named { .. } if table.offset(reference.terminal()).is_none() => {
            collector.emit(
                Diagnostic::warning(format!(
                    "terminal `{}` is not defined for {kind} `{}`",
                    reference.terminal(),
                    component.id()
                ))
                .with_code(ErrorCode::E301)
                .with_help(format!(
                    "valid terminals are {}; the default terminal is used",
                    quoted_list(table.names())
                )),
            );
        }
        TerminalTable::HorizontalOffset if parse_offset(reference.terminal()).is_none() => {
            collector.emit(
                Diagnostic::warning(format!("bus terminal `{reference}` is not a number"))
                .with_code(ErrorCode::E307)
                .with_help("bus terminals are horizontal offsets such as `bus1.-40`; offset 0 is used"),
            );
        }
        _ => {}
    }
}

fn quoted_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;

    fn build(value: Value) -> Result<ParsedDiagram, ParseError> {
        build_diagram(DiagramWire::deserialize(&value).unwrap())
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
        diagnostics.iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_minimal_diagram() {
        let parsed = build(json!({
            "width": 200, "height": 100,
            "components": [{"id": "b1", "type": "battery", "x": 50, "y": 50, "label": "V1"}],
            "connections": []
        }))
        .unwrap();

        assert!(parsed.warnings().is_empty());
        let diagram = parsed.diagram();
        assert_eq!(diagram.kind(), DiagramKind::Schematic);
        assert_eq!(diagram.components().len(), 1);
        assert_eq!(diagram.components()[0].label(), "V1");
        assert_eq!(diagram.components()[0].kind(), Some(ComponentKind::Battery));
    }

    #[test]
    fn test_optional_fields_default() {
        let parsed = build(json!({
            "diagramType": "single-line",
            "width": 300, "height": 200,
            "components": [
                {"id": "bus1", "type": "bus", "x": 100, "y": 40},
                {"id": "cb1", "type": "breaker", "x": 100, "y": 100, "state": "closed"}
            ],
            "connections": [{"from": "bus1.-40", "to": "cb1.in"}]
        }))
        .unwrap();

        let diagram = parsed.diagram();
        assert_eq!(diagram.kind(), DiagramKind::SingleLine);
        let bus = diagram.component("bus1").unwrap();
        assert_eq!(bus.label(), "");
        assert_eq!(bus.width(), voltchat_core::semantic::DEFAULT_BUS_WIDTH);
        assert_eq!(diagram.component("cb1").unwrap().state(), SwitchState::Closed);
        assert!(parsed.warnings().is_empty());
    }

    #[test]
    fn test_missing_canvas_is_an_error() {
        let err = build(json!({"components": [], "connections": []})).unwrap_err();
        assert_eq!(codes(err.diagnostics()), vec![ErrorCode::E200, ErrorCode::E200]);
    }

    #[test]
    fn test_non_positive_canvas_is_an_error() {
        let err = build(json!({"width": 0, "height": -5, "components": [], "connections": []}))
            .unwrap_err();
        assert_eq!(codes(err.diagnostics()), vec![ErrorCode::E202, ErrorCode::E202]);
    }

    #[test]
    fn test_negative_bus_width_is_an_error() {
        let err = build(json!({
            "diagramType": "single-line", "width": 100, "height": 100,
            "components": [{"id": "bus1", "type": "bus", "x": 0, "y": 0, "width": -1}],
            "connections": []
        }))
        .unwrap_err();
        assert_eq!(codes(err.diagnostics()), vec![ErrorCode::E203]);
    }

    #[test]
    fn test_width_on_other_kinds_is_ignored() {
        let parsed = build(json!({
            "width": 100, "height": 100,
            "components": [{"id": "r1", "type": "resistor", "x": 0, "y": 0, "width": -1}],
            "connections": []
        }))
        .unwrap();
        assert!(parsed.warnings().is_empty());
    }

    #[test]
    fn test_missing_component_fields_are_all_reported() {
        let err = build(json!({
            "width": 100, "height": 100,
            "components": [{"label": "?"}],
            "connections": [{"from": "a.b"}]
        }))
        .unwrap_err();

        let messages: Vec<_> = err.diagnostics().iter().map(Diagnostic::message).collect();
        assert_eq!(err.diagnostics().len(), 5);
        assert!(messages.contains(&"missing required field `components[0].id`"));
        assert!(messages.contains(&"missing required field `components[0].y`"));
        assert!(messages.contains(&"missing required field `connections[0].to`"));
    }

    #[test]
    fn test_tolerated_problems_are_warnings() {
        let parsed = build(json!({
            "diagramType": "blueprint",
            "width": 100, "height": 100,
            "components": [
                {"id": "r1", "type": "resistor", "x": 0, "y": 0, "label": "R1"},
                {"id": "r1", "type": "resistor", "x": 50, "y": 0},
                {"id": "x1", "type": "flux-capacitor", "x": 10, "y": 10},
                {"id": "s1", "type": "switch", "x": 20, "y": 20, "state": "ajar"},
                {"id": "g1", "type": "generator", "x": 30, "y": 30}
            ],
            "connections": [
                {"from": "r1.in", "to": "ghost.out"},
                {"from": "r1.gate", "to": "s1.in"}
            ]
        }))
        .unwrap();

        assert_eq!(
            codes(parsed.warnings()),
            vec![
                ErrorCode::E306,
                ErrorCode::E302,
                ErrorCode::E303,
                ErrorCode::E304,
                ErrorCode::E305,
                ErrorCode::E300,
                ErrorCode::E301,
            ]
        );
        let diagram = parsed.diagram();
        assert_eq!(diagram.components().len(), 5);
        assert_eq!(diagram.connections().len(), 2);
        assert_eq!(diagram.component("r1").unwrap().label(), "R1");
        assert_eq!(diagram.component("s1").unwrap().state(), SwitchState::Open);
    }

    #[test]
    fn test_malformed_connection_is_dropped_alone() {
        let parsed = build(json!({
            "width": 200, "height": 100,
            "components": [
                {"id": "r1", "type": "resistor", "x": 40, "y": 50},
                {"id": "r2", "type": "resistor", "x": 140, "y": 50}
            ],
            "connections": [
                {"from": "r1.out", "to": "r2.in"},
                {"from": "r2.out"},
                {"from": 7, "to": "r1.in"},
                "r1.in -> r2.out"
            ]
        }))
        .unwrap();

        assert_eq!(
            codes(parsed.warnings()),
            vec![ErrorCode::E200, ErrorCode::E201, ErrorCode::E201]
        );
        assert_eq!(
            parsed.warnings()[0].message(),
            "missing required field `connections[1].to`"
        );
        assert_eq!(parsed.diagram().connections().len(), 1);
        assert_eq!(parsed.diagram().connections()[0].to().component_id(), "r2");
    }

    #[test]
    fn test_non_string_label_and_state_use_defaults() {
        let parsed = build(json!({
            "width": 200, "height": 100,
            "components": [
                {"id": "r1", "type": "resistor", "x": 40, "y": 50, "label": 10},
                {"id": "s1", "type": "switch", "x": 140, "y": 50, "label": "S1", "state": true}
            ],
            "connections": []
        }))
        .unwrap();

        assert_eq!(codes(parsed.warnings()), vec![ErrorCode::E201, ErrorCode::E201]);
        assert_eq!(
            parsed.warnings()[0].message(),
            "`components[0].label` should be a string, got a number"
        );
        let diagram = parsed.diagram();
        assert_eq!(diagram.component("r1").unwrap().label(), "");
        assert_eq!(diagram.component("s1").unwrap().label(), "S1");
        assert_eq!(diagram.component("s1").unwrap().state(), SwitchState::Open);
    }

    #[test]
    fn test_overflowing_bus_width_is_an_error() {
        let err = build(json!({
            "diagramType": "single-line", "width": 100, "height": 100,
            "components": [{"id": "bus1", "type": "bus", "x": 0, "y": 0, "width": 1e300}],
            "connections": []
        }))
        .unwrap_err();

        assert_eq!(codes(err.diagnostics()), vec![ErrorCode::E201]);
        assert!(err.diagnostics()[0].message().contains("components[0].width"));
    }

    #[test]
    fn test_unrepresentable_canvas_is_out_of_range() {
        let err = build(json!({
            "width": 1e-50, "height": 1e300,
            "components": [], "connections": []
        }))
        .unwrap_err();

        assert_eq!(codes(err.diagnostics()), vec![ErrorCode::E202, ErrorCode::E202]);
        for diagnostic in err.diagnostics() {
            assert!(diagnostic.message().ends_with("is out of range"));
        }
    }

    #[test]
    fn test_unknown_terminal_help_lists_valid_names() {
        let parsed = build(json!({
            "width": 100, "height": 100,
            "components": [{"id": "d1", "type": "led", "x": 0, "y": 0}],
            "connections": [{"from": "d1.gate", "to": "d1.anode"}]
        }))
        .unwrap();

        let help = parsed.warnings()[0].help().unwrap();
        assert!(help.contains("`anode`, `cathode`"));
    }

    #[test]
    fn test_bus_offsets_and_single_terminals() {
        let parsed = build(json!({
            "diagramType": "single-line",
            "width": 100, "height": 100,
            "components": [
                {"id": "bus1", "type": "bus", "x": 100, "y": 40},
                {"id": "gen1", "type": "generator", "x": 100, "y": 0}
            ],
            "connections": [
                {"from": "bus1.-40", "to": "gen1.out"},
                {"from": "bus1.left", "to": "gen1"}
            ]
        }))
        .unwrap();

        assert_eq!(codes(parsed.warnings()), vec![ErrorCode::E307]);
    }
}
