//! Command-line argument definitions for the Pegboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the grammar and input files, the start
//! rule, configuration file and logging verbosity.

use clap::Parser;

use pegboard::DEFAULT_START;

/// Command-line arguments for the Pegboard grammar tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the grammar file
    #[arg(help = "Path to the grammar file")]
    pub grammar: String,

    /// Path to the input file; standard input is read when omitted
    #[arg(help = "Path to the input file (default: standard input)")]
    pub input: Option<String>,

    /// Rule to start parsing from
    #[arg(short, long, default_value = DEFAULT_START)]
    pub start: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the compiled grammar before the parse tree
    #[arg(long)]
    pub print_grammar: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pegboard", "grammar.peg"]);

        assert_eq!(args.grammar, "grammar.peg");
        assert_eq!(args.input, None);
        assert_eq!(args.start, "root");
        assert!(!args.print_grammar);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "pegboard",
            "grammar.peg",
            "input.txt",
            "--start",
            "list",
            "--config",
            "pegboard.toml",
            "--print-grammar",
            "--log-level",
            "off",
        ]);

        assert_eq!(args.input.as_deref(), Some("input.txt"));
        assert_eq!(args.start, "list");
        assert_eq!(args.config.as_deref(), Some("pegboard.toml"));
        assert!(args.print_grammar);
        assert_eq!(args.log_level, "off");
    }
}
