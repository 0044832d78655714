//! Error codes for reply diagnostics.
//!
//! Codes are grouped by the pass that reports them:
//! - `E1xx` - payload extraction (JSON syntax, payload shape)
//! - `E2xx` - diagram structure (fatal)
//! - `E3xx` - references and vocabulary (tolerated, reported as warnings)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Extraction (E1xx)
    // =========================================================================
    /// Invalid JSON syntax in the reply or its fenced block.
    E100,

    /// The payload is valid JSON but does not describe a diagram.
    E101,

    // =========================================================================
    // Structure (E2xx)
    // =========================================================================
    /// A required field is missing.
    E200,

    /// A field has the wrong JSON type.
    E201,

    /// Canvas width or height is not positive.
    E202,

    /// A bus declares a negative width.
    E203,

    // =========================================================================
    // References (E3xx)
    // =========================================================================
    /// A connection references an undefined component.
    E300,

    /// A connection names a terminal the component does not have.
    E301,

    /// A component id is declared more than once.
    E302,

    /// A component has an unrecognized type.
    E303,

    /// A switch has an unrecognized state.
    E304,

    /// A component belongs to the other diagram family.
    E305,

    /// The diagram type is unrecognized.
    E306,

    /// A bus terminal name is not a number.
    E307,
}

impl ErrorCode {
    /// Returns the code as a string, e.g. `"E300"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            ErrorCode::E305 => "E305",
            ErrorCode::E306 => "E306",
            ErrorCode::E307 => "E307",
        }
    }

    /// Returns a short description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid JSON syntax",
            ErrorCode::E101 => "payload is not a diagram",
            ErrorCode::E200 => "missing required field",
            ErrorCode::E201 => "field has the wrong type",
            ErrorCode::E202 => "canvas size must be positive",
            ErrorCode::E203 => "bus width must not be negative",
            ErrorCode::E300 => "undefined component reference",
            ErrorCode::E301 => "unknown terminal",
            ErrorCode::E302 => "duplicate component id",
            ErrorCode::E303 => "unknown component type",
            ErrorCode::E304 => "unknown switch state",
            ErrorCode::E305 => "component from another diagram family",
            ErrorCode::E306 => "unknown diagram type",
            ErrorCode::E307 => "non-numeric bus offset",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
