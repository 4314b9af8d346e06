//! Result tree nodes produced by a parse.

use std::fmt;

/// A node of the result tree.
///
/// A parse produces an ordered sequence of nodes rather than a single root:
/// flattened rules splice their children into the caller, and a sequence
/// concatenates whatever its terms produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A run of consumed input symbols.
    Raw(String),
    /// A rule result wrapped under a tag.
    Labeled { tag: String, children: Vec<Node> },
}

impl Node {
    /// Create a raw node from consumed input text.
    pub fn raw(text: impl Into<String>) -> Self {
        Node::Raw(text.into())
    }

    /// Create a labeled node.
    pub fn labeled(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Labeled {
            tag: tag.into(),
            children,
        }
    }

    /// Returns the tag of a labeled node.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Raw(_) => None,
            Node::Labeled { tag, .. } => Some(tag),
        }
    }

    /// Returns the children of a labeled node, or an empty slice for raw nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Raw(_) => &[],
            Node::Labeled { children, .. } => children,
        }
    }

    /// Returns the text of a raw node.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Node::Raw(text) => Some(text),
            Node::Labeled { .. } => None,
        }
    }

    /// Concatenates every raw span below this node in order.
    ///
    /// Discarded input never reaches the tree, so this is not necessarily the
    /// text the node was parsed from.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Raw(text) => out.push_str(text),
            Node::Labeled { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Compact single-line form: raw spans are quoted, labeled nodes print as
/// `tag(child child ...)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Raw(text) => write!(f, "{text:?}"),
            Node::Labeled { tag, children } => {
                write!(f, "{tag}(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
