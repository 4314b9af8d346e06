//! Error types for Pegboard operations.
//!
//! This module provides the main error type [`PegboardError`] which wraps
//! the error conditions that can occur while compiling a grammar or parsing
//! input against it.

use std::io;

use thiserror::Error;

use pegboard_core::ParseFailure;
use pegboard_parser::error::ParseError;

/// The main error type for Pegboard operations.
///
/// # Diagnostic Variants
///
/// `Parse` carries the structured diagnostics of a rejected grammar together
/// with the grammar text, and `Match` carries the failure trace of a parse
/// together with the input text, so callers can point into either source.
#[derive(Debug, Error)]
pub enum PegboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("{failure}")]
    Match { failure: ParseFailure, input: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PegboardError {
    /// Create a new `Parse` error with the associated grammar text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Match` error with the input that failed to parse.
    pub fn new_match_error(failure: ParseFailure, input: impl Into<String>) -> Self {
        Self::Match {
            failure,
            input: input.into(),
        }
    }
}
