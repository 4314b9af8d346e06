//! Error and diagnostic system for the Pegboard grammar compiler.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the grammar text
//! - Severity levels
//! - Diagnostic collector for accumulating errors and warnings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, source locations,
//! help text and trailing notes. Compilation failures wrap one or more
//! diagnostics in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use pegboard_parser::error::{Diagnostic, ErrorCode};
//! # use pegboard_parser::Span;
//!
//! let diag = Diagnostic::error("invalid grammar definition")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(7..8), "parsing stopped here")
//!     .with_help("expected text \"->\"")
//!     .with_note("failed to parse rule \"rule\"");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
