//! Per-parse result envelope.
//!
//! Every combinator returns a [`Parsed`]: the nodes it produced and an
//! [`Outcome`] describing how much input it consumed and, on failure, the
//! diagnostic trace. There is no separate success flag; an empty trace is
//! success.

use crate::{error::ParseFailure, node::Node};

/// Consumed count plus diagnostic trace of a single parse.
///
/// `consumed` is relative to the slice the combinator was handed, never a
/// global position. On failure it is the progress made before giving up,
/// which the choice operator uses to pick the furthest failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    consumed: usize,
    /// Innermost line first; each enclosing combinator appends one line.
    diagnostics: Vec<String>,
    /// Names of the rules that failed, innermost first.
    rules: Vec<String>,
}

impl Outcome {
    /// A successful outcome.
    pub fn success(consumed: usize) -> Self {
        Self {
            consumed,
            ..Self::default()
        }
    }

    /// A failed outcome with a single diagnostic line.
    pub fn failure(consumed: usize, message: impl Into<String>) -> Self {
        Self {
            consumed,
            diagnostics: vec![message.into()],
            rules: Vec::new(),
        }
    }

    /// Number of input symbols matched from the start of the given slice.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The diagnostic trace, innermost first. Empty on success.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// The stack of rules that failed, innermost first.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Returns `true` when the trace is empty.
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` when the trace is non-empty.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub(crate) fn with_consumed(mut self, consumed: usize) -> Self {
        self.consumed = consumed;
        self
    }

    pub(crate) fn push_diagnostic(mut self, message: impl Into<String>) -> Self {
        self.diagnostics.push(message.into());
        self
    }

    pub(crate) fn push_rule(mut self, name: &str) -> Self {
        self.rules.push(name.to_string());
        self
    }
}

/// Nodes produced by a combinator together with its [`Outcome`].
///
/// When the outcome is a failure the nodes are a best-effort partial result,
/// useful for reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub nodes: Vec<Node>,
    pub outcome: Outcome,
}

impl Parsed {
    pub fn new(nodes: Vec<Node>, outcome: Outcome) -> Self {
        Self { nodes, outcome }
    }

    pub fn success(nodes: Vec<Node>, consumed: usize) -> Self {
        Self::new(nodes, Outcome::success(consumed))
    }

    pub fn failure(consumed: usize, message: impl Into<String>) -> Self {
        Self::new(Vec::new(), Outcome::failure(consumed, message))
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }

    pub fn consumed(&self) -> usize {
        self.outcome.consumed()
    }

    /// Converts into a discriminated result.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] carrying the trace, the rule stack, the
    /// offset reached and the partial nodes when the outcome is a failure.
    pub fn into_result(self) -> Result<Vec<Node>, ParseFailure> {
        if self.is_success() {
            return Ok(self.nodes);
        }

        let Outcome {
            consumed,
            diagnostics,
            rules,
        } = self.outcome;
        Err(ParseFailure::new(consumed, diagnostics, rules, self.nodes))
    }

    pub(crate) fn push_diagnostic(self, message: impl Into<String>) -> Self {
        Self {
            nodes: self.nodes,
            outcome: self.outcome.push_diagnostic(message),
        }
    }
}
