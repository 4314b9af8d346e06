//! CLI logic for the Pegboard grammar tool.
//!
//! Compiles a grammar file, parses an input file (or standard input) from a
//! start rule and writes the resulting tree.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use pegboard::{GrammarBuilder, PegboardError};

/// Run the Pegboard CLI application
///
/// Output (the compiled grammar when requested, then the parse tree) is
/// written to `out`.
///
/// # Errors
///
/// Returns `PegboardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Grammar compilation errors
/// - Input that does not match the grammar
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), PegboardError> {
    info!(
        grammar_path = args.grammar,
        input_path:? = args.input,
        start = args.start;
        "Processing grammar"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = GrammarBuilder::new(app_config);

    let source = fs::read_to_string(&args.grammar)?;
    let grammar = builder.compile(&source)?;
    info!(rules = grammar.table().len(); "Grammar compiled");

    if args.print_grammar {
        writeln!(out, "{grammar}")?;
    }

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };

    let nodes = builder.parse(&grammar, &input, &args.start)?;
    out.write_all(builder.render(&nodes).as_bytes())?;

    info!(nodes = nodes.len(); "Input parsed successfully");

    Ok(())
}
