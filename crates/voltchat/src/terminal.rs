//! Terminal resolution.
//!
//! Turns a `"<componentId>.<terminalName>"` reference into an absolute canvas
//! point by adding the terminal's local offset from the symbol library to the
//! component position.

use log::{debug, trace};

use voltchat_core::{
    geometry::Point,
    semantic::{Component, Diagram, TerminalPolicy, TerminalRef},
    shape::terminal_offsets,
};

/// Resolves a terminal of a component to an absolute point.
///
/// - A name found in the kind's terminal table resolves to that terminal.
/// - Bus terminals are horizontal offsets; a name that is not a number is
///   offset `0`.
/// - Generators and loads have one terminal and accept any name.
/// - Any other unknown name resolves to the kind's default terminal under
///   [`TerminalPolicy::Lenient`] and to `None` under [`TerminalPolicy::Strict`].
/// - A component of unknown kind has no terminals; every name resolves to the
///   component position.
///
/// # Examples
///
/// ```
/// # use voltchat::semantic::{Component, ComponentKind, TerminalPolicy};
/// # use voltchat::terminal::terminal_point;
/// let bus = Component::new("bus1", ComponentKind::Bus, 100.0, 40.0);
/// let point = terminal_point(&bus, "-40", TerminalPolicy::Lenient).unwrap();
/// assert_eq!((point.x(), point.y()), (60.0, 40.0));
/// ```
pub fn terminal_point(
    component: &Component,
    terminal: &str,
    policy: TerminalPolicy,
) -> Option<Point> {
    let Some(kind) = component.kind() else {
        return Some(component.position());
    };
    let table = terminal_offsets(kind);

    let offset = match (table.offset(terminal), policy) {
        (Some(offset), _) => offset,
        (None, TerminalPolicy::Lenient) => {
            trace!(id = component.id(), terminal = terminal; "Unknown terminal, using default");
            table.default_offset()
        }
        (None, TerminalPolicy::Strict) => {
            debug!(id = component.id(), terminal = terminal; "Unknown terminal rejected");
            return None;
        }
    };

    Some(component.position().add_point(offset))
}

/// Resolves a reference against the components of `diagram`.
///
/// Returns `None` when the referenced component does not exist, or when
/// [`terminal_point`] rejects the terminal.
pub fn resolve(
    diagram: &Diagram,
    reference: &TerminalRef,
    policy: TerminalPolicy,
) -> Option<Point> {
    let component = diagram.component(reference.component_id())?;
    terminal_point(component, reference.terminal(), policy)
}
