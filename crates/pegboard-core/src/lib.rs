//! Pegboard Core Combinators
//!
//! This crate provides the parsing-expression-grammar engine used by Pegboard.
//! It includes:
//!
//! - **Outcomes**: The per-parse result envelope ([`Outcome`], [`Parsed`])
//! - **Nodes**: Result trees of raw spans and labeled nodes ([`Node`])
//! - **Combinators**: The closed set of matching primitives and operators ([`Combinator`])
//! - **Rule tables**: Named rules with tagging policy and lazy resolution ([`RuleTable`])
//!
//! # Example
//!
//! ```
//! use pegboard_core::{Combinator, Node, RuleTable};
//!
//! let mut table = RuleTable::new();
//! table.insert(
//!     "greeting",
//!     Combinator::seq([Combinator::text("hello"), Combinator::Whitespace, Combinator::rule("name")]),
//! );
//! table.insert_flattened("name", Combinator::Identifier);
//!
//! let parsed = table.parse_str("hello world", "greeting");
//! assert!(parsed.is_success());
//! assert_eq!(
//!     parsed.nodes,
//!     vec![Node::labeled("greeting", vec![Node::raw("hello"), Node::raw("world")])]
//! );
//! ```

mod combinator;
mod error;
mod node;
mod outcome;
mod primitives;
mod table;

pub use combinator::Combinator;
pub use error::ParseFailure;
pub use node::Node;
pub use outcome::{Outcome, Parsed};
pub use table::{Limits, Rule, RuleTable, Tag};

/// The rule name a parse starts from when none is given.
pub const DEFAULT_START: &str = "root";
