//! The grammar-definition language, written with the combinators it compiles to.
//!
//! ```text
//! root       ::= (Whitespace rule)+ Whitespace END
//! rule       ::= Identifier (":" Identifier?)? Whitespace "->" Whitespace choice Whitespace ";"
//! choice     ::= sequence (Whitespace "|" Whitespace sequence)*
//! sequence   ::= repetition (Whitespace repetition)*
//! repetition ::= atom ("*" | "+" | "?")?
//! atom       ::= "(" Whitespace choice Whitespace ")" | Identifier | QuotedText
//! ```
//!
//! `;`, `|` and the parentheses are discarded, so the compiler only ever sees
//! names, quoted text, the `:` and `->` markers of a rule header and the
//! repetition suffixes. A `repetition` node without a suffix has the atom as
//! its only child; each atom is parsed exactly once.

use std::sync::LazyLock;

use pegboard_core::{Combinator, RuleTable};

pub(crate) const ROOT: &str = "root";
pub(crate) const RULE: &str = "rule";
pub(crate) const CHOICE: &str = "choice";
pub(crate) const SEQUENCE: &str = "sequence";
pub(crate) const REPETITION: &str = "repetition";
pub(crate) const ATOM: &str = "atom";

pub(crate) const ARROW: &str = "->";
pub(crate) const LABEL_MARKER: &str = ":";
pub(crate) const ZERO_OR_MORE: &str = "*";
pub(crate) const ONE_OR_MORE: &str = "+";
pub(crate) const OPTIONAL: &str = "?";

static DSL_GRAMMAR: LazyLock<RuleTable> = LazyLock::new(build);

/// The grammar of the grammar-definition language.
///
/// Built on first use and shared afterwards. Every rule is bare, so each
/// match is tagged with its rule name.
pub fn dsl_grammar() -> &'static RuleTable {
    &DSL_GRAMMAR
}

fn build() -> RuleTable {
    let mut table = RuleTable::new();

    table.insert(
        ROOT,
        Combinator::seq([
            Combinator::one_or_more(Combinator::seq([
                Combinator::Whitespace,
                Combinator::rule(RULE),
            ])),
            Combinator::Whitespace,
            Combinator::end(),
        ]),
    );

    table.insert(
        RULE,
        Combinator::seq([
            Combinator::Identifier,
            Combinator::optional(Combinator::seq([
                Combinator::text(LABEL_MARKER),
                Combinator::optional(Combinator::Identifier),
            ])),
            Combinator::Whitespace,
            Combinator::text(ARROW),
            Combinator::Whitespace,
            Combinator::rule(CHOICE),
            Combinator::Whitespace,
            Combinator::discard(Combinator::text(";")),
        ]),
    );

    table.insert(
        CHOICE,
        Combinator::seq([
            Combinator::rule(SEQUENCE),
            Combinator::zero_or_more(Combinator::seq([
                Combinator::Whitespace,
                Combinator::discard(Combinator::text("|")),
                Combinator::Whitespace,
                Combinator::rule(SEQUENCE),
            ])),
        ]),
    );

    table.insert(
        SEQUENCE,
        Combinator::seq([
            Combinator::rule(REPETITION),
            Combinator::zero_or_more(Combinator::seq([
                Combinator::Whitespace,
                Combinator::rule(REPETITION),
            ])),
        ]),
    );

    table.insert(
        REPETITION,
        Combinator::seq([
            Combinator::rule(ATOM),
            Combinator::optional(Combinator::choice([
                Combinator::text(ZERO_OR_MORE),
                Combinator::text(ONE_OR_MORE),
                Combinator::text(OPTIONAL),
            ])),
        ]),
    );

    table.insert(
        ATOM,
        Combinator::choice([
            Combinator::seq([
                Combinator::discard(Combinator::text("(")),
                Combinator::Whitespace,
                Combinator::rule(CHOICE),
                Combinator::Whitespace,
                Combinator::discard(Combinator::text(")")),
            ]),
            Combinator::Identifier,
            Combinator::QuotedText,
        ]),
    );

    table
}
