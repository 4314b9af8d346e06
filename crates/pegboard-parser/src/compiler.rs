//! Compiles grammar-definition text into a [`RuleTable`].
//!
//! Compilation runs in two steps. The text is first parsed against the
//! [bootstrap grammar](crate::bootstrap::dsl_grammar); then every `rule` node
//! of the resulting tree is translated into a combinator and installed in a
//! fresh table. Rule references inside the translated bodies are names only,
//! resolved against the new table when a parse reaches them, so rules may
//! appear in any order and may be recursive.
//!
//! The rule header decides the tagging policy:
//!
//! | header          | result of a match                      |
//! |-----------------|----------------------------------------|
//! | `name -> e;`    | one node tagged `name`                 |
//! | `name: -> e;`   | the children of `e`, unwrapped         |
//! | `name:tag -> e;`| one node tagged `tag`                  |

use std::fmt;

use log::{debug, trace};

use pegboard_core::{Combinator, Limits, Node, Outcome, Parsed, Rule, RuleTable, Tag};

use crate::{
    bootstrap::{
        self, ARROW, ATOM, CHOICE, LABEL_MARKER, ONE_OR_MORE, OPTIONAL, REPETITION, ROOT, RULE,
        SEQUENCE, ZERO_OR_MORE,
    },
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// A compiled grammar together with the warnings raised while compiling it.
#[derive(Debug, Clone)]
pub struct Grammar {
    table: RuleTable,
    warnings: Vec<Diagnostic>,
}

impl Grammar {
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn into_table(self) -> RuleTable {
        self.table
    }

    /// Warnings such as references to rules that are never defined.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Replace the limits parses against this grammar run under.
    pub fn with_limits(self, limits: Limits) -> Self {
        Self {
            table: self.table.with_limits(limits),
            warnings: self.warnings,
        }
    }

    /// Parse `input` from rule `start`. See [`RuleTable::parse`].
    pub fn parse(&self, input: &[char], start: &str) -> Parsed {
        self.table.parse(input, start)
    }

    /// Parse text from rule `start`. See [`RuleTable::parse_str`].
    pub fn parse_str(&self, input: &str, start: &str) -> Parsed {
        self.table.parse_str(input, start)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.table, f)
    }
}

/// Translates grammar text into [`Grammar`]s.
#[derive(Debug, Clone)]
pub struct Compiler {
    dsl: &'static RuleTable,
    limits: Limits,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            dsl: bootstrap::dsl_grammar(),
            limits: Limits::default(),
        }
    }

    /// Limits given to every grammar this compiler produces.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Compile grammar text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not valid grammar syntax
    /// ([`ErrorCode::E100`]), defines a rule twice ([`ErrorCode::E200`]) or
    /// produces a tree the compiler cannot translate ([`ErrorCode::E201`]).
    pub fn load(&self, text: &str) -> Result<Grammar, ParseError> {
        let symbols: Vec<char> = text.chars().collect();
        let parsed = self.dsl.parse(&symbols, ROOT);
        if parsed.is_failure() {
            return Err(self.syntax_error(text, &symbols, &parsed.outcome).into());
        }

        let rules = match parsed.nodes.as_slice() {
            [Node::Labeled { tag, children }] if tag == ROOT => children,
            _ => return Err(unsupported(&Node::labeled(ROOT, parsed.nodes)).into()),
        };

        let mut table = RuleTable::new().with_limits(self.limits);
        let mut collector = DiagnosticCollector::new();

        for node in rules {
            match load_rule(node) {
                Ok((name, _)) if table.contains(&name) => {
                    collector.emit(
                        Diagnostic::error(format!("rule `{name}` is defined more than once"))
                            .with_code(ErrorCode::E200)
                            .with_help("rename or remove one of the definitions"),
                    );
                    trace!(rule = name; "Duplicate rule dropped");
                }
                Ok((name, rule)) => {
                    table.insert_rule(name, rule);
                }
                Err(diagnostic) => collector.emit(diagnostic),
            }
        }

        if !collector.has_errors() {
            let missing: Vec<String> = table
                .undefined_references()
                .into_iter()
                .map(String::from)
                .collect();
            for name in missing {
                collector.emit(
                    Diagnostic::warning(format!("rule `{name}` is referenced but never defined"))
                        .with_code(ErrorCode::E202)
                        .with_help(format!("parses that reach `{name}` will fail")),
                );
            }
        }

        let warnings = collector.finish()?;
        debug!(rules = table.len(), warnings = warnings.len(); "Grammar compiled");

        Ok(Grammar { table, warnings })
    }

    /// Builds the E100 diagnostic for text the bootstrap grammar rejected.
    fn syntax_error(&self, text: &str, symbols: &[char], root: &Outcome) -> Diagnostic {
        let (rule_start, stopped, lines) = if root.rules().iter().any(|name| name == RULE) {
            // The first rule failed; the trace already points inside it.
            let start = Combinator::Whitespace.parse(self.dsl, symbols).consumed();
            (start, root.consumed(), root.diagnostics().to_vec())
        } else {
            // A later rule failed, the repetition stopped in front of it and
            // only the end-of-input check reported. Parse that rule again to
            // find out why it failed.
            let start = root.consumed();
            let rule = self.dsl.parse(&symbols[start..], RULE);
            if rule.is_failure() {
                (
                    start,
                    start + rule.consumed(),
                    rule.outcome.diagnostics().to_vec(),
                )
            } else {
                (start, start, root.diagnostics().to_vec())
            }
        };

        let mut lines = lines.into_iter();
        let reason = lines
            .next()
            .unwrap_or_else(|| "grammar text is not valid".to_string());

        let mut diagnostic = Diagnostic::error("invalid grammar definition")
            .with_code(ErrorCode::E100)
            .with_label(Span::at_char(text, stopped), "parsing stopped here")
            .with_help(reason)
            .with_notes(lines);
        if stopped > rule_start {
            diagnostic =
                diagnostic.with_secondary_label(Span::at_char(text, rule_start), "rule starts here");
        }
        diagnostic
    }
}

/// Compile grammar text with a default [`Compiler`].
///
/// # Errors
///
/// See [`Compiler::load`].
///
/// # Example
///
/// ```
/// use pegboard_parser::compile;
///
/// let grammar = compile(r#"greeting -> "hello" " " name; name: -> "world" | "there";"#)
///     .expect("valid grammar");
/// let parsed = grammar.parse_str("hello there", "greeting");
/// assert!(parsed.is_success());
/// assert_eq!(parsed.consumed(), 11);
/// ```
pub fn compile(text: &str) -> Result<Grammar, ParseError> {
    Compiler::new().load(text)
}

/// Splits a `rule` node into its name, tagging policy and translated body.
fn load_rule(node: &Node) -> Result<(String, Rule), Diagnostic> {
    let children = match node {
        Node::Labeled { tag, children } if tag == RULE => children,
        _ => return Err(unsupported(node)),
    };

    let (name, tag, body) = match children.as_slice() {
        [Node::Raw(name), Node::Raw(arrow), body] if arrow == ARROW => (name, Tag::Rule, body),
        [Node::Raw(name), Node::Raw(marker), Node::Raw(arrow), body]
            if marker == LABEL_MARKER && arrow == ARROW =>
        {
            (name, Tag::Flatten, body)
        }
        [
            Node::Raw(name),
            Node::Raw(marker),
            Node::Raw(label),
            Node::Raw(arrow),
            body,
        ] if marker == LABEL_MARKER && arrow == ARROW => (name, Tag::Label(label.clone()), body),
        _ => return Err(unsupported(node)),
    };

    Ok((name.clone(), Rule::new(load_expr(body)?, tag)))
}

/// Translates an expression subtree into a combinator.
///
/// Single-child choices, sequences and suffix-less repetitions collapse to
/// their child, and parenthesised atoms to their contents, so the result
/// carries no structure the text did not need.
pub(crate) fn load_expr(node: &Node) -> Result<Combinator, Diagnostic> {
    match node {
        Node::Raw(text) => Ok(load_leaf(text)),
        Node::Labeled { tag, children } => match (tag.as_str(), children.as_slice()) {
            (CHOICE | SEQUENCE | REPETITION | ATOM, [only]) => load_expr(only),
            (CHOICE, alternatives) if alternatives.len() > 1 => Ok(Combinator::Choice(
                alternatives.iter().map(load_expr).collect::<Result<_, _>>()?,
            )),
            (SEQUENCE, terms) if terms.len() > 1 => Ok(Combinator::Sequence(
                terms.iter().map(load_expr).collect::<Result<_, _>>()?,
            )),
            (REPETITION, [inner, Node::Raw(suffix)]) => {
                let inner = load_expr(inner)?;
                match suffix.as_str() {
                    ZERO_OR_MORE => Ok(Combinator::zero_or_more(inner)),
                    ONE_OR_MORE => Ok(Combinator::one_or_more(inner)),
                    OPTIONAL => Ok(Combinator::optional(inner)),
                    _ => Err(unsupported(node)),
                }
            }
            _ => Err(unsupported(node)),
        },
    }
}

/// Quoted leaves become literal text; anything else names a rule.
fn load_leaf(text: &str) -> Combinator {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close => {
            Combinator::text(&text[1..text.len() - 1])
        }
        _ => Combinator::rule(text),
    }
}

fn unsupported(node: &Node) -> Diagnostic {
    Diagnostic::error(format!("unsupported construct {node} in grammar syntax tree"))
        .with_code(ErrorCode::E201)
        .with_help("this is a defect in the grammar compiler, not in the grammar text")
}
