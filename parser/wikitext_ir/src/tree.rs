//! The document tree facade.

use std::fmt;

use crate::error::ListError;
use crate::list::ViewList;
use crate::node::Node;

/// An ordered, mutable sequence of [`Node`], backed by a
/// [`ViewList`].
///
/// This is both the builder's output and the child container of every
/// node variant that owns nested markup. `clone` produces a second
/// handle onto the same storage (reference semantics, matching how nodes
/// embed their child trees); [`PartialEq`] compares element values
/// deeply, so two independently built trees compare equal without
/// sharing anything.
#[derive(Clone, Default)]
pub struct Wikitext {
    nodes: ViewList<Node>,
}

impl Wikitext {
    /// Create an empty tree.
    pub fn new() -> Self {
        Wikitext {
            nodes: ViewList::new(),
        }
    }

    /// Create a tree owning `nodes`.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Wikitext {
            nodes: ViewList::from_vec(nodes),
        }
    }

    /// Create a tree holding a single text node.
    pub fn from_text(value: impl Into<String>) -> Self {
        Self::from_nodes(vec![Node::text(value)])
    }

    /// Number of top-level nodes visible through this handle.
    pub fn len(&self) -> Result<usize, ListError> {
        self.nodes.len()
    }

    /// Whether no nodes are visible through this handle.
    pub fn is_empty(&self) -> Result<bool, ListError> {
        self.nodes.is_empty()
    }

    /// Append a node after the last visible one.
    pub fn append(&self, node: Node) -> Result<(), ListError> {
        self.nodes.append(node)
    }

    /// Insert a node at `index`.
    pub fn insert(&self, index: usize, node: Node) -> Result<(), ListError> {
        self.nodes.insert(index, node)
    }

    /// Remove and return the node at `index`.
    pub fn remove(&self, index: usize) -> Result<Node, ListError> {
        self.nodes.remove(index)
    }

    /// Replace the node at `index`, returning the old one.
    pub fn replace(&self, index: usize, node: Node) -> Result<Node, ListError> {
        self.nodes.replace(index, node)
    }

    /// Clone out the node at `index`. Child trees inside the returned
    /// node still share storage with this tree.
    pub fn get(&self, index: usize) -> Result<Node, ListError> {
        self.nodes.get(index)
    }

    /// Snapshot the visible nodes.
    pub fn to_vec(&self) -> Result<Vec<Node>, ListError> {
        self.nodes.to_vec()
    }

    /// Spawn a live window over `[start, end)` of this tree.
    pub fn view(&self, start: usize, end: usize) -> Result<Wikitext, ListError> {
        Ok(Wikitext {
            nodes: self.nodes.view(start, end)?,
        })
    }
}

impl PartialEq for Wikitext {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

// Debug shows the node list; a dead view renders as such.
impl fmt::Debug for Wikitext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wikitext(")?;
        fmt::Debug::fmt(&self.nodes, f)?;
        write!(f, ")")
    }
}
