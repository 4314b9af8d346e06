//! The closed set of parsing combinators.
//!
//! [`Combinator`] is a sum type covering both the fixed-shape primitives
//! (literals, quoted text, whitespace, identifiers) and the operators that
//! compose them (sequence, ordered choice, repetition, discard, rule
//! reference). Every variant is evaluated by [`Combinator::parse`], which
//! reads a suffix of the input and never mutates anything.
//!
//! # Ordered choice
//!
//! [`Combinator::Choice`] commits to the first alternative that succeeds, in
//! textual order, even when a later alternative would match more input.
//! When every alternative fails it reports the one that got furthest.
//!
//! # Rule references
//!
//! [`Combinator::RuleRef`] holds only a name. It is resolved against the
//! [`RuleTable`] running the parse, at the moment it is reached, so rules may
//! refer to rules defined later and to themselves.

use std::fmt;

use log::trace;

use crate::{
    node::Node,
    outcome::Parsed,
    primitives::{self, QUOTES, QuoteError},
    table::{CallStack, RuleTable},
};

/// A parsing expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combinator {
    /// One symbol equal to the value, or end of input for `None`.
    Literal(Option<char>),
    /// An exact run of symbols.
    LiteralText(String),
    /// A `'` or `"` delimited run, delimiters included, without escapes.
    QuotedText,
    /// Any run of spaces, tabs and line breaks; always succeeds and yields nothing.
    Whitespace,
    /// The longest run of symbols outside the reserved set.
    Identifier,
    /// Terms applied one after another.
    Sequence(Vec<Combinator>),
    /// Ordered alternation.
    Choice(Vec<Combinator>),
    /// Between `lo` and `hi` applications of a term; `hi` of `None` is unbounded.
    Repeat {
        term: Box<Combinator>,
        lo: usize,
        hi: Option<usize>,
    },
    /// Consumes like the term but contributes no nodes.
    Discard(Box<Combinator>),
    /// A reference to another rule by name.
    RuleRef(String),
}

impl Combinator {
    /// Matches one symbol.
    pub fn literal(value: char) -> Self {
        Combinator::Literal(Some(value))
    }

    /// Matches only at end of input.
    pub fn end() -> Self {
        Combinator::Literal(None)
    }

    /// Matches an exact run of symbols.
    pub fn text(value: impl Into<String>) -> Self {
        Combinator::LiteralText(value.into())
    }

    pub fn seq(terms: impl IntoIterator<Item = Combinator>) -> Self {
        Combinator::Sequence(terms.into_iter().collect())
    }

    pub fn choice(terms: impl IntoIterator<Item = Combinator>) -> Self {
        Combinator::Choice(terms.into_iter().collect())
    }

    pub fn repeat(term: Combinator, lo: usize, hi: Option<usize>) -> Self {
        Combinator::Repeat {
            term: Box::new(term),
            lo,
            hi,
        }
    }

    pub fn zero_or_more(term: Combinator) -> Self {
        Self::repeat(term, 0, None)
    }

    pub fn one_or_more(term: Combinator) -> Self {
        Self::repeat(term, 1, None)
    }

    pub fn optional(term: Combinator) -> Self {
        Self::repeat(term, 0, Some(1))
    }

    pub fn discard(term: Combinator) -> Self {
        Combinator::Discard(Box::new(term))
    }

    pub fn rule(name: impl Into<String>) -> Self {
        Combinator::RuleRef(name.into())
    }

    /// Parse the front of `input`, resolving rule references in `table`.
    ///
    /// The returned consumed count is relative to `input`.
    pub fn parse(&self, table: &RuleTable, input: &[char]) -> Parsed {
        self.parse_at(table, input, CallStack::default())
    }

    /// Parse below the rules in `stack`, which [`RuleTable`] uses to detect
    /// left recursion and enforce its depth limit.
    pub(crate) fn parse_at(
        &self,
        table: &RuleTable,
        input: &[char],
        stack: CallStack<'_>,
    ) -> Parsed {
        match self {
            Combinator::Literal(expected) => parse_literal(*expected, input),
            Combinator::LiteralText(value) => parse_text(value, input),
            Combinator::QuotedText => parse_quoted(input),
            Combinator::Whitespace => Parsed::success(Vec::new(), primitives::scan_whitespace(input)),
            Combinator::Identifier => parse_identifier(input),
            Combinator::Sequence(terms) => self.parse_sequence(terms, table, input, stack),
            Combinator::Choice(terms) => self.parse_choice(terms, table, input, stack),
            Combinator::Repeat { term, lo, hi } => {
                self.parse_repeat(term, *lo, *hi, table, input, stack)
            }
            Combinator::Discard(term) => {
                let parsed = term.parse_at(table, input, stack);
                Parsed::new(Vec::new(), parsed.outcome)
            }
            Combinator::RuleRef(name) => {
                let parsed = table.parse_rule(input, name, stack);
                if parsed.is_success() {
                    return parsed;
                }
                parsed.push_diagnostic(format!("failed to parse rule reference \"{name}\""))
            }
        }
    }

    /// Rule names referenced anywhere inside this expression, in first-seen
    /// order, with duplicates.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Combinator::Literal(_)
            | Combinator::LiteralText(_)
            | Combinator::QuotedText
            | Combinator::Whitespace
            | Combinator::Identifier => {}
            Combinator::Sequence(terms) | Combinator::Choice(terms) => {
                for term in terms {
                    term.collect_references(names);
                }
            }
            Combinator::Repeat { term, .. } | Combinator::Discard(term) => {
                term.collect_references(names)
            }
            Combinator::RuleRef(name) => names.push(name),
        }
    }

    fn parse_sequence(
        &self,
        terms: &[Combinator],
        table: &RuleTable,
        input: &[char],
        stack: CallStack<'_>,
    ) -> Parsed {
        let mut nodes = Vec::new();
        let mut consumed = 0;

        for (index, term) in terms.iter().enumerate() {
            let parsed = term.parse_at(table, &input[consumed..], stack);
            nodes.extend(parsed.nodes);
            consumed += parsed.outcome.consumed();

            if parsed.outcome.is_failure() {
                let outcome = parsed.outcome.with_consumed(consumed).push_diagnostic(format!(
                    "failed to parse sequence at term {} of {}",
                    index + 1,
                    terms.len()
                ));
                return Parsed::new(nodes, outcome);
            }
        }

        Parsed::success(nodes, consumed)
    }

    fn parse_choice(
        &self,
        terms: &[Combinator],
        table: &RuleTable,
        input: &[char],
        stack: CallStack<'_>,
    ) -> Parsed {
        let mut furthest: Option<Parsed> = None;

        for term in terms {
            let parsed = term.parse_at(table, input, stack);
            if parsed.is_success() {
                return parsed;
            }

            // Ties keep the earlier alternative.
            if furthest
                .as_ref()
                .is_none_or(|best| parsed.consumed() > best.consumed())
            {
                furthest = Some(parsed);
            }
        }

        let message = format!("no alternative matched in choice of {}", terms.len());
        match furthest {
            Some(parsed) => parsed.push_diagnostic(message),
            None => Parsed::failure(0, message),
        }
    }

    fn parse_repeat(
        &self,
        term: &Combinator,
        lo: usize,
        hi: Option<usize>,
        table: &RuleTable,
        input: &[char],
        stack: CallStack<'_>,
    ) -> Parsed {
        let mut nodes = Vec::new();
        let mut consumed = 0;
        let mut count = 0;

        while count < lo {
            let parsed = term.parse_at(table, &input[consumed..], stack);
            nodes.extend(parsed.nodes);
            consumed += parsed.outcome.consumed();

            if parsed.outcome.is_failure() {
                let outcome = parsed
                    .outcome
                    .with_consumed(consumed)
                    .push_diagnostic(format!(
                        "failed to parse repetition after {count} of at least {lo} matches"
                    ));
                return Parsed::new(nodes, outcome);
            }
            count += 1;
        }

        while hi.is_none_or(|hi| count < hi) {
            let parsed = term.parse_at(table, &input[consumed..], stack);
            if parsed.is_failure() {
                trace!(count, consumed; "Repetition stopped");
                break;
            }

            let step = parsed.consumed();
            nodes.extend(parsed.nodes);
            consumed += step;
            count += 1;

            // Without an upper bound, a match that consumes nothing would
            // match forever.
            if step == 0 && hi.is_none() {
                break;
            }
        }

        Parsed::success(nodes, consumed)
    }
}

fn parse_literal(expected: Option<char>, input: &[char]) -> Parsed {
    match (expected, input.first()) {
        (None, None) => Parsed::success(Vec::new(), 0),
        (Some(expected), Some(&found)) if expected == found => {
            Parsed::success(vec![Node::Raw(found.to_string())], 1)
        }
        (expected, found) => Parsed::failure(
            0,
            format!(
                "expected {} but found {}",
                describe_symbol(expected),
                describe_symbol(found.copied())
            ),
        ),
    }
}

fn parse_text(value: &str, input: &[char]) -> Parsed {
    match primitives::scan_text(input, value) {
        Some(len) => Parsed::success(vec![Node::raw(value)], len),
        None => Parsed::failure(0, format!("expected text {}", quote_text(value))),
    }
}

fn parse_quoted(input: &[char]) -> Parsed {
    match primitives::scan_quoted(input) {
        Ok(len) => Parsed::success(vec![Node::Raw(input[..len].iter().collect())], len),
        Err(QuoteError::NotQuoted) => Parsed::failure(
            0,
            format!("expected quoted text but found {}", describe_symbol(input.first().copied())),
        ),
        Err(QuoteError::Unterminated) => Parsed::failure(0, "unterminated quoted text"),
    }
}

fn parse_identifier(input: &[char]) -> Parsed {
    match primitives::scan_identifier(input) {
        0 => Parsed::failure(
            0,
            format!("expected identifier but found {}", describe_symbol(input.first().copied())),
        ),
        len => Parsed::success(vec![Node::Raw(input[..len].iter().collect())], len),
    }
}

fn describe_symbol(symbol: Option<char>) -> String {
    match symbol {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

/// Quotes literal text the way the grammar language would write it.
fn quote_text(value: &str) -> String {
    let quote = if value.contains(QUOTES[0]) {
        QUOTES[1]
    } else {
        QUOTES[0]
    };
    format!("{quote}{value}{quote}")
}

/// Prints the expression in grammar-language form.
///
/// Expressions built by the grammar compiler print back into text the
/// compiler accepts. Primitives without a surface syntax print as their
/// names (`identifier`, `text`, `space`, `END`).
impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Literal(Some(c)) => write!(f, "{c:?}"),
            Combinator::Literal(None) => write!(f, "END"),
            Combinator::LiteralText(value) => write!(f, "{}", quote_text(value)),
            Combinator::QuotedText => write!(f, "text"),
            Combinator::Whitespace => write!(f, "space"),
            Combinator::Identifier => write!(f, "identifier"),
            Combinator::Sequence(terms) => write_joined(f, terms, " "),
            Combinator::Choice(terms) => write_joined(f, terms, " | "),
            Combinator::Repeat { term, lo, hi } => match (lo, hi) {
                (0, None) => write!(f, "{term}*"),
                (1, None) => write!(f, "{term}+"),
                (0, Some(1)) => write!(f, "{term}?"),
                (lo, None) => write!(f, "{term}{{{lo},}}"),
                (lo, Some(hi)) => write!(f, "{term}{{{lo},{hi}}}"),
            },
            Combinator::Discard(term) => write!(f, "-{term}-"),
            Combinator::RuleRef(name) => write!(f, "{name}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, terms: &[Combinator], separator: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{term}")?;
    }
    write!(f, ")")
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Alternatives that each match a fixed prefix of `a`s.
    fn prefix_alternatives() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..5, 1..5)
    }

    proptest! {
        #[test]
        fn choice_commits_to_first_success(lens in prefix_alternatives(), extra in 0usize..5) {
            let longest = lens.iter().copied().max().unwrap_or(0);
            let input: Vec<char> = "a".repeat(longest + extra).chars().collect();
            let choice = Combinator::choice(
                lens.iter().map(|&n| Combinator::text("a".repeat(n))),
            );

            let parsed = choice.parse(&RuleTable::new(), &input);
            prop_assert!(parsed.is_success());
            prop_assert_eq!(parsed.consumed(), lens[0]);
        }

        #[test]
        fn choice_failure_reports_maximum_progress(lens in prefix_alternatives()) {
            // Each alternative matches `n` symbols then demands a 'b'.
            let input: Vec<char> = "a".repeat(10).chars().collect();
            let choice = Combinator::choice(lens.iter().map(|&n| {
                Combinator::seq([Combinator::text("a".repeat(n)), Combinator::literal('b')])
            }));

            let parsed = choice.parse(&RuleTable::new(), &input);
            prop_assert!(parsed.is_failure());
            prop_assert_eq!(parsed.consumed(), lens.iter().copied().max().unwrap_or(0));
        }

        #[test]
        fn repeat_respects_bounds(lo in 0usize..4, span in 0usize..4, available in 0usize..10) {
            let hi = lo + span;
            let mut input: Vec<char> = "a".repeat(available).chars().collect();
            input.push('b');
            let repeat = Combinator::repeat(Combinator::literal('a'), lo, Some(hi));

            let parsed = repeat.parse(&RuleTable::new(), &input);
            if available < lo {
                prop_assert!(parsed.is_failure());
                prop_assert_eq!(parsed.consumed(), available);
            } else {
                prop_assert!(parsed.is_success());
                prop_assert_eq!(parsed.consumed(), available.min(hi));
            }
        }

        #[test]
        fn discard_hides_nodes_but_not_progress(s in "[a-z]{1,8}") {
            let input: Vec<char> = s.chars().collect();
            let plain = Combinator::Identifier.parse(&RuleTable::new(), &input);
            let discarded = Combinator::discard(Combinator::Identifier).parse(&RuleTable::new(), &input);

            prop_assert!(discarded.nodes.is_empty());
            prop_assert_eq!(discarded.consumed(), plain.consumed());
        }
    }
}
