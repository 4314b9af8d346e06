//! Error adapter for converting PegboardError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`pegboard_parser::error::ParseError`] contains multiple diagnostics,
//! each diagnostic is rendered independently. A failed match against the
//! input renders as a single report pointing into the input text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use pegboard::{ParseFailure, PegboardError};
use pegboard_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// Adapter for a single grammar diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Grammar text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    /// The help text followed by the remaining trace lines, if any.
    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let notes = self.diag.notes();
        match (self.diag.help(), notes.is_empty()) {
            (None, true) => None,
            (Some(help), true) => Some(Box::new(help) as Box<dyn fmt::Display>),
            (help, false) => {
                let lines: Vec<&str> = help
                    .into_iter()
                    .chain(notes.iter().map(String::as_str))
                    .collect();
                Some(Box::new(lines.join("\n")) as Box<dyn fmt::Display>)
            }
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for a failed match of the input against the grammar.
///
/// The label sits at the furthest offset the parse reached and the help
/// lists the failure trace, innermost first.
pub struct MatchAdapter<'a> {
    failure: &'a ParseFailure,
    /// Input text for displaying snippets
    input: &'a str,
}

impl<'a> MatchAdapter<'a> {
    pub fn new(failure: &'a ParseFailure, input: &'a str) -> Self {
        Self { failure, input }
    }
}

impl fmt::Debug for MatchAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchAdapter")
            .field("failure", &self.failure)
            .finish()
    }
}

impl fmt::Display for MatchAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failure.rules().last() {
            Some(rule) => write!(f, "input does not match rule `{rule}`"),
            None => write!(f, "input does not match the grammar"),
        }
    }
}

impl std::error::Error for MatchAdapter<'_> {}

impl MietteDiagnostic for MatchAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("pegboard::match") as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let trace = self.failure.trace();
        if trace.is_empty() {
            return None;
        }
        Some(Box::new(trace.join("\n")) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.input as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = span_to_miette(Span::at_char(self.input, self.failure.offset()));
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.failure.reason().to_string()),
            span,
        ))))
    }
}

/// Adapter for [`PegboardError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a PegboardError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PegboardError::Io(_) => "pegboard::io",
            PegboardError::Config(_) => "pegboard::config",
            PegboardError::Parse { .. } | PegboardError::Match { .. } => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A grammar diagnostic with a location in the grammar text.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A match failure with a location in the input text.
    Match(MatchAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn inner(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(d) => d,
            Reportable::Match(m) => m,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().code()
    }

    fn severity(&self) -> Option<MietteSeverity> {
        self.inner().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

/// Convert a pegboard [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`PegboardError`] into a list of reportable errors.
///
/// For [`PegboardError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &PegboardError) -> Vec<Reportable<'_>> {
    match err {
        PegboardError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        PegboardError::Match { failure, input } => {
            vec![Reportable::Match(MatchAdapter::new(failure, input))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use pegboard_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("test error")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..5), "here")
            .with_help("try this");
        let err = PegboardError::new_parse_error(ParseError::from(diag), "hello");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "test error");
                assert_eq!(d.help().unwrap().to_string(), "try this");
                assert_eq!(d.code().unwrap().to_string(), "E100");
            }
            other => panic!("Expected Diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E201)
                .with_label(Span::new(10..15), "second"),
        ];
        let err = PegboardError::new_parse_error(ParseError::from(diags), "source code here...");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
    }

    #[test]
    fn test_notes_follow_help() {
        let diag = Diagnostic::error("invalid grammar definition")
            .with_help("expected text \";\"")
            .with_notes(["failed to parse rule \"rule\""]);
        let adapter = DiagnosticAdapter::new(&diag, "a -> b");

        assert_eq!(
            adapter.help().unwrap().to_string(),
            "expected text \";\"\nfailed to parse rule \"rule\""
        );
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("unused").with_code(ErrorCode::E202);
        let adapter = DiagnosticAdapter::new(&diag, "");

        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_match_failure_points_into_input() {
        let failure = ParseFailure::new(
            2,
            vec![
                "expected 'b' but found 'x'".to_string(),
                "failed to parse rule \"pair\"".to_string(),
            ],
            vec!["pair".to_string()],
            Vec::new(),
        );
        let err = PegboardError::new_match_error(failure, "aax");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "input does not match rule `pair`");
        assert_eq!(
            reportables[0].code().unwrap().to_string(),
            "pegboard::match"
        );

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].label(), Some("expected 'b' but found 'x'"));
        assert!(labels[0].primary());
    }

    #[test]
    fn test_non_source_error() {
        let err = PegboardError::Config("bad depth".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad depth");
                assert_eq!(e.code().unwrap().to_string(), "pegboard::config");
            }
            other => panic!("Expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_labels_returned() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary label")
            .with_secondary_label(Span::new(10..15), "secondary label");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary label"));
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("secondary label"));
        assert!(!labels[1].primary());
    }
}
