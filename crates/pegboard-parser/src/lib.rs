//! # Pegboard Parser
//!
//! The grammar-definition language of Pegboard and its compiler. Grammar
//! text is parsed by a hand-built [`RuleTable`](pegboard_core::RuleTable)
//! written with the same combinators the compiler emits, then translated
//! into a new table.
//!
//! ## Grammar language
//!
//! ```text
//! list -> item (',' item)*;
//! item: -> number | '(' list ')';
//! number:num -> digit+;
//! digit: -> '0' | '1' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9';
//! ```
//!
//! - `name -> expr;` tags each match with `name`
//! - `name: -> expr;` splices the match into its caller
//! - `name:tag -> expr;` tags each match with `tag`
//! - `a b` sequence, `a | b` ordered choice, `a*` `a+` `a?` repetition
//! - `'text'` or `"text"` literal text, without escapes
//! - any other word refers to a rule
//!
//! ## Usage
//!
//! ```
//! use pegboard_parser::{compile, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let grammar = compile("pair -> 'a' 'b';")?;
//!     let parsed = grammar.parse_str("ab", "pair");
//!     assert!(parsed.is_success());
//!     Ok(())
//! }
//! ```

mod bootstrap;
mod compiler;
pub mod error;
mod span;

pub use bootstrap::dsl_grammar;
pub use compiler::{Compiler, Grammar, compile};
pub use span::Span;
