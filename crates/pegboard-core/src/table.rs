//! Named rule registry.
//!
//! A [`RuleTable`] maps rule names to combinators together with a tagging
//! policy that decides how a successful rule shows up in the result tree.
//! Rule references are looked up when they are reached during a parse, so a
//! table may be filled in any order, including rules that refer to
//! themselves. Once built, a table is only read; it can be shared freely
//! between threads.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::{DEFAULT_START, combinator::Combinator, node::Node, outcome::Parsed};

/// How a successful rule is represented in the result tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Wrap the result in a node tagged with the rule's own name.
    #[default]
    Rule,
    /// Splice the rule's children straight into the caller.
    Flatten,
    /// Wrap the result in a node tagged with this label.
    Label(String),
}

/// A rule body and its tagging policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    combinator: Combinator,
    tag: Tag,
}

impl Rule {
    pub fn new(combinator: Combinator, tag: Tag) -> Self {
        Self { combinator, tag }
    }

    pub fn combinator(&self) -> &Combinator {
        &self.combinator
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}

/// Resource bounds applied to every parse against a table.
///
/// Re-entering a rule at the position it is already being parsed at fails
/// straight away as left recursion. The depth limit bounds every other kind
/// of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_depth: usize,
    max_input_len: Option<usize>,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new(max_depth: usize, max_input_len: Option<usize>) -> Self {
        Self {
            max_depth,
            max_input_len,
        }
    }

    /// Maximum number of nested rule references.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Longest accepted input, in symbols.
    pub fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH, None)
    }
}

/// A grammar: named rules plus the limits parses against it run under.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: IndexMap<String, Rule>,
    limits: Limits,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the limits used by subsequent parses.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Insert a rule whose results are tagged with its own name.
    ///
    /// Returns the rule previously stored under `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, combinator: Combinator) -> Option<Rule> {
        self.insert_rule(name, Rule::new(combinator, Tag::Rule))
    }

    /// Insert a rule whose results are tagged with `label`.
    ///
    /// An empty label behaves like [`RuleTable::insert_flattened`].
    pub fn insert_tagged(
        &mut self,
        name: impl Into<String>,
        combinator: Combinator,
        label: impl Into<String>,
    ) -> Option<Rule> {
        let label = label.into();
        let tag = if label.is_empty() {
            Tag::Flatten
        } else {
            Tag::Label(label)
        };
        self.insert_rule(name, Rule::new(combinator, tag))
    }

    /// Insert a rule whose results are spliced into the caller unwrapped.
    pub fn insert_flattened(
        &mut self,
        name: impl Into<String>,
        combinator: Combinator,
    ) -> Option<Rule> {
        self.insert_rule(name, Rule::new(combinator, Tag::Flatten))
    }

    pub fn insert_rule(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names referenced by some rule body but not defined in this table,
    /// in first-seen order.
    pub fn undefined_references(&self) -> Vec<&str> {
        let mut missing = IndexSet::new();
        for rule in self.rules.values() {
            for name in rule.combinator.references() {
                if !self.contains(name) {
                    missing.insert(name);
                }
            }
        }
        missing.into_iter().collect()
    }

    /// Parse the front of `input` starting from rule `start`.
    ///
    /// The parse does not have to consume the whole input; compare
    /// [`Parsed::consumed`] with the input length to check for that.
    pub fn parse(&self, input: &[char], start: &str) -> Parsed {
        if let Some(max) = self.limits.max_input_len {
            if input.len() > max {
                return Parsed::failure(
                    0,
                    format!("input of {} symbols exceeds the limit of {max}", input.len()),
                );
            }
        }

        debug!(start, input_len = input.len(); "Parsing");
        let parsed = self.parse_rule(input, start, CallStack::default());
        debug!(
            start,
            consumed = parsed.consumed(),
            success = parsed.is_success();
            "Parse finished"
        );
        parsed
    }

    /// Parse from the `root` rule.
    pub fn parse_root(&self, input: &[char]) -> Parsed {
        self.parse(input, DEFAULT_START)
    }

    /// Parse text, treating each `char` as one symbol.
    pub fn parse_str(&self, input: &str, start: &str) -> Parsed {
        let symbols: Vec<char> = input.chars().collect();
        self.parse(&symbols, start)
    }

    pub(crate) fn parse_rule(&self, input: &[char], name: &str, stack: CallStack<'_>) -> Parsed {
        // Inputs are always suffixes of the original, so the remaining
        // length identifies the position.
        if stack.is_active(name, input.len()) {
            return Parsed::failure(0, format!("left recursion detected at rule \"{name}\""));
        }

        let depth = stack.depth();
        if depth > self.limits.max_depth {
            return Parsed::failure(
                0,
                format!(
                    "recursion limit of {} exceeded at rule \"{name}\"",
                    self.limits.max_depth
                ),
            );
        }

        let Some(rule) = self.rules.get(name) else {
            return Parsed::failure(0, format!("rule \"{name}\" is not defined in grammar"));
        };

        let frame = Frame {
            rule: name,
            remaining: input.len(),
            depth,
            parent: stack,
        };
        let parsed = rule.combinator.parse_at(self, input, CallStack { top: Some(&frame) });
        if parsed.is_failure() {
            trace!(rule = name, consumed = parsed.consumed(); "Rule failed");
            let Parsed { nodes, outcome } = parsed;
            return Parsed::new(
                nodes,
                outcome
                    .push_diagnostic(format!("failed to parse rule \"{name}\""))
                    .push_rule(name),
            );
        }

        match &rule.tag {
            Tag::Rule => wrap(parsed, name),
            Tag::Label(label) => wrap(parsed, label),
            Tag::Flatten => parsed,
        }
    }
}

/// The rules currently being parsed, innermost first.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CallStack<'a> {
    top: Option<&'a Frame<'a>>,
}

#[derive(Debug)]
struct Frame<'a> {
    rule: &'a str,
    remaining: usize,
    depth: usize,
    parent: CallStack<'a>,
}

impl CallStack<'_> {
    /// Nesting depth of the next rule entered below this stack.
    fn depth(&self) -> usize {
        self.top.map_or(0, |frame| frame.depth + 1)
    }

    fn is_active(&self, rule: &str, remaining: usize) -> bool {
        let mut current = self.top;
        while let Some(frame) = current {
            if frame.rule == rule && frame.remaining == remaining {
                return true;
            }
            current = frame.parent.top;
        }
        false
    }
}

fn wrap(parsed: Parsed, tag: &str) -> Parsed {
    let Parsed { nodes, outcome } = parsed;
    Parsed::new(vec![Node::labeled(tag, nodes)], outcome)
}

/// Prints every rule in grammar-language form, one per line, in insertion
/// order.
impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, rule) in &self.rules {
            match &rule.tag {
                Tag::Rule => writeln!(f, "{name} -> {};", rule.combinator)?,
                Tag::Flatten => writeln!(f, "{name}: -> {};", rule.combinator)?,
                Tag::Label(label) => writeln!(f, "{name}:{label} -> {};", rule.combinator)?,
            }
        }
        Ok(())
    }
}
