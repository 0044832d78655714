//! Accumulates diagnostics while a diagram payload is checked.

use log::{debug, warn};

use crate::error::{Diagnostic, ParseError};

/// Collects every problem in a payload instead of stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Errors mark the collection as failed.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            debug!(diagnostic:% = diagnostic; "Diagram payload rejected");
            self.has_errors = true;
        } else {
            warn!(diagnostic:% = diagnostic; "Diagram payload tolerated");
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// Returns the warnings when nothing fatal was reported, otherwise a
    /// [`ParseError`] carrying every diagnostic.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
