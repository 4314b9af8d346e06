//! Error codes for the Pegboard diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Grammar syntax errors
//! - `E2xx` - Grammar compilation errors and warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Invalid grammar syntax.
    ///
    /// The grammar text does not match the grammar-definition language.
    E100,

    // =========================================================================
    // Compilation Errors (E2xx)
    // =========================================================================
    /// Duplicate rule definition.
    ///
    /// Two rules in the same grammar share a name.
    E200,

    /// Unsupported construct.
    ///
    /// The syntax tree contained a shape the compiler cannot translate.
    /// This indicates a defect in the compiler rather than in the grammar.
    E201,

    /// Undefined rule reference.
    ///
    /// A rule body refers to a name no rule defines. Parses fail only on
    /// paths that reach the reference.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid grammar syntax",
            ErrorCode::E200 => "duplicate rule definition",
            ErrorCode::E201 => "unsupported construct",
            ErrorCode::E202 => "undefined rule reference",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
