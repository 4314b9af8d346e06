//! Text rendering of parse trees.

use std::fmt::{self, Write};

use pegboard_core::Node;

use crate::config::OutputFormat;

const INDENT: &str = "  ";

/// Render parse nodes as text, one line per node in [`OutputFormat::Tree`]
/// and one line per top-level node in [`OutputFormat::Debug`].
///
/// # Example
///
/// ```
/// use pegboard::{Node, config::OutputFormat, render_nodes};
///
/// let nodes = vec![Node::labeled("pair", vec![Node::raw("a"), Node::raw("b")])];
///
/// assert_eq!(render_nodes(&nodes, OutputFormat::Tree), "pair\n  \"a\"\n  \"b\"\n");
/// assert_eq!(render_nodes(&nodes, OutputFormat::Debug), "pair(\"a\" \"b\")\n");
/// ```
pub fn render_nodes(nodes: &[Node], format: OutputFormat) -> String {
    let mut out = String::new();
    // Only a failing writer can make formatting fail, and a String never does.
    write_nodes(&mut out, nodes, format).map_or_else(|_| String::new(), |()| out)
}

/// Write parse nodes to `out` in the given layout, stopping at the first
/// write error.
pub fn write_nodes(out: &mut impl Write, nodes: &[Node], format: OutputFormat) -> fmt::Result {
    match format {
        OutputFormat::Tree => {
            for node in nodes {
                write_tree(out, node, 0)?;
            }
        }
        OutputFormat::Debug => {
            for node in nodes {
                writeln!(out, "{node}")?;
            }
        }
    }
    Ok(())
}

fn write_tree(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    match node {
        Node::Raw(text) => writeln!(out, "{text:?}"),
        Node::Labeled { tag, children } => {
            writeln!(out, "{tag}")?;
            for child in children {
                write_tree(out, child, depth + 1)?;
            }
            Ok(())
        }
    }
}
