// Node identity and the per-node data stored by the Tree.

use std::{collections::HashMap, fmt};

use uuid::Uuid;

use crate::domain::name::ROOT_MARKER;

/// An opaque handle to a node in a [`Tree`](crate::Tree).
///
/// Handles are cheap to copy and alias the live tree: every operation sees the
/// node's current name, parent and children. A handle outlives the node it
/// refers to only if the node is removed with
/// [`Tree::remove`](crate::Tree::remove); afterwards it is simply unknown to
/// the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The UUID backing this handle.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name and links of a single node.
///
/// Identity lives in the key of the Tree's node map. The parent link is a
/// non-owning handle; ownership flows downwards through `children`.
#[derive(Debug)]
pub struct NodeData {
    /// Empty only for an unnamed root.
    pub name: String,
    pub parent: Option<NodeId>,
    /// Keyed by each child's own `name`.
    pub children: HashMap<String, NodeId>,
}

impl NodeData {
    pub fn root(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: HashMap::new(),
        }
    }

    pub fn child(name: String, parent: NodeId) -> Self {
        Self {
            name,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }

    /// The name used for display and ordering; an unnamed root shows the root
    /// marker.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            ROOT_MARKER
        } else {
            &self.name
        }
    }
}
