//! Structured failure type for callers that want a `Result`.

use thiserror::Error;

use crate::node::Node;

/// A failed parse, converted from a [`Parsed`](crate::Parsed) with a
/// non-empty trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse failed at offset {offset}: {}", innermost(.trace))]
pub struct ParseFailure {
    offset: usize,
    trace: Vec<String>,
    rules: Vec<String>,
    partial: Vec<Node>,
}

impl ParseFailure {
    pub fn new(offset: usize, trace: Vec<String>, rules: Vec<String>, partial: Vec<Node>) -> Self {
        Self {
            offset,
            trace,
            rules,
            partial,
        }
    }

    /// Furthest input offset (in symbols) the failing parse reached.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Full diagnostic trace, innermost first.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// The innermost diagnostic, which names the symbol that did not match.
    pub fn reason(&self) -> &str {
        innermost(&self.trace)
    }

    /// Rules that failed, innermost first.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Best-effort nodes collected before the failure.
    pub fn partial(&self) -> &[Node] {
        &self.partial
    }
}

fn innermost(trace: &[String]) -> &str {
    trace.first().map(String::as_str).unwrap_or("unknown failure")
}
