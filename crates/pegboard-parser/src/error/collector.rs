//! Collector for accumulating diagnostics during compilation.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a compilation phase.
///
/// Errors and warnings are gathered in emission order. Finishing yields the
/// warnings when no error was emitted, or every diagnostic as a
/// [`ParseError`] otherwise.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] holding every diagnostic, warnings included,
    /// if any error was emitted.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
