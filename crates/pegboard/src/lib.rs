//! Pegboard - a self-hosted PEG engine.
//!
//! Grammars are written in a small rule language, compiled into tables of
//! parsing combinators, and run against text to produce trees of tagged
//! nodes. The rule language is itself parsed by those combinators.

pub mod config;

mod error;
mod render;

pub use pegboard_core::{Combinator, DEFAULT_START, Limits, Node, ParseFailure, RuleTable, Tag};
pub use pegboard_parser::Grammar;

pub use error::PegboardError;
pub use render::{render_nodes, write_nodes};

use log::{debug, trace, warn};

use pegboard_parser::Compiler;

use config::AppConfig;

/// Builder for compiling grammars and parsing input against them.
///
/// # Examples
///
/// ```rust
/// use pegboard::{GrammarBuilder, config::AppConfig};
///
/// let source = r#"
///     pair -> word " " word;
///     word: -> 'a' | 'b';
/// "#;
///
/// let builder = GrammarBuilder::new(AppConfig::default());
///
/// let grammar = builder.compile(source)
///     .expect("Failed to compile");
///
/// let nodes = builder.parse(&grammar, "a b", "pair")
///     .expect("Failed to parse");
///
/// assert_eq!(nodes[0].text(), "a b");
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    config: AppConfig,
}

impl GrammarBuilder {
    /// Create a new grammar builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Limits and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compile grammar text into a [`Grammar`].
    ///
    /// The configured limits are attached to the grammar. Compiler warnings
    /// are logged and stay available through [`Grammar::warnings`].
    ///
    /// # Errors
    ///
    /// Returns `PegboardError::Config` for invalid limits and
    /// `PegboardError::Parse` when the grammar text is rejected.
    pub fn compile(&self, source: &str) -> Result<Grammar, PegboardError> {
        debug!(source_len = source.len(); "Compiling grammar");

        let limits = self
            .config
            .limits()
            .to_limits()
            .map_err(PegboardError::Config)?;

        let grammar = Compiler::new()
            .with_limits(limits)
            .load(source)
            .map_err(|err| PegboardError::new_parse_error(err, source))?;

        for warning in grammar.warnings() {
            warn!(code:? = warning.code(); "{}", warning.message());
        }

        debug!(
            rules = grammar.table().len(),
            warnings = grammar.warnings().len();
            "Grammar compiled"
        );
        trace!(grammar:%; "Compiled grammar");

        Ok(grammar)
    }

    /// Parse `input` from rule `start` of `grammar`.
    ///
    /// # Errors
    ///
    /// Returns `PegboardError::Match` carrying the failure trace and the
    /// input when the parse does not succeed. A successful parse may still
    /// stop short of the end of the input; that is logged as a warning.
    pub fn parse(
        &self,
        grammar: &Grammar,
        input: &str,
        start: &str,
    ) -> Result<Vec<Node>, PegboardError> {
        debug!(start = start, input_len = input.len(); "Parsing input");

        let parsed = grammar.parse_str(input, start);
        let consumed = parsed.consumed();
        let nodes = parsed
            .into_result()
            .map_err(|failure| PegboardError::new_match_error(failure, input))?;

        let total = input.chars().count();
        if consumed < total {
            warn!(consumed = consumed, remaining = total - consumed; "Input not fully consumed");
        }

        debug!(nodes = nodes.len(); "Input parsed");
        Ok(nodes)
    }

    /// Render nodes with the configured [`OutputFormat`](config::OutputFormat).
    pub fn render(&self, nodes: &[Node]) -> String {
        render_nodes(nodes, self.config.output().format())
    }
}
