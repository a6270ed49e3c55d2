// NodeView - a borrowed view of a node for queries.

use std::{collections::VecDeque, fmt, ops::ControlFlow};

use crate::domain::{
    node::{NodeData, NodeId},
    render, Tree,
};

/// A borrowed view of a single node in a [`Tree`].
///
/// All read-only operations live here: lookup, enumeration, breadth-first
/// search, path construction and rendering. Views are cheap to copy; obtain
/// one with [`Tree::node`].
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
    data: &'a NodeData,
}

impl<'a> NodeView<'a> {
    pub(crate) const fn new(tree: &'a Tree, id: NodeId, data: &'a NodeData) -> Self {
        Self { tree, id, data }
    }

    /// The handle of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The node's name. Empty for an unnamed root.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    /// The name used for display and ordering.
    ///
    /// Identical to [`name`](Self::name), except that an unnamed root shows
    /// the root marker `/`.
    #[must_use]
    pub fn display_name(&self) -> &'a str {
        self.data.display_name()
    }

    /// The node's parent, or `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.data.parent.and_then(|parent| self.tree.node(parent))
    }

    /// Whether this node has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.data.parent.is_none()
    }

    /// The number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.children.len()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.children.is_empty()
    }

    /// Looks up the direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Self> {
        self.data
            .children
            .get(name)
            .and_then(|&child| self.tree.node(child))
    }

    /// A snapshot of the direct children, in no particular order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.iter_children().collect()
    }

    /// Names of the direct children in ascending lexicographic order.
    #[must_use]
    pub fn list(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.data.children.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Calls `visit` for each direct child, in no particular order, until it
    /// returns [`ControlFlow::Break`].
    pub fn for_child<F>(&self, mut visit: F)
    where
        F: FnMut(Self) -> ControlFlow<()>,
    {
        for child in self.iter_children() {
            if visit(child).is_break() {
                break;
            }
        }
    }

    /// Calls `visit` for each ancestor, from the immediate parent up to the
    /// root, until it returns [`ControlFlow::Break`].
    pub fn for_parent<F>(&self, mut visit: F)
    where
        F: FnMut(Self) -> ControlFlow<()>,
    {
        for ancestor in self.ancestors() {
            if visit(ancestor).is_break() {
                break;
            }
        }
    }

    /// Iterates over the ancestors, from the immediate parent up to the root.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Breadth-first search for a descendant with the given name.
    ///
    /// Each level is searched in full before descending. The search inspects
    /// the children of every visited node, so the receiver itself is never
    /// returned even when its own name matches. When several nodes at the same
    /// depth match, which one is returned is unspecified.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Self> {
        let mut queue = VecDeque::from([*self]);
        while let Some(node) = queue.pop_front() {
            if let Some(found) = node.child(name) {
                return Some(found);
            }
            queue.extend(node.iter_children());
        }
        None
    }

    /// The path from the root to this node, joined with the tree's configured
    /// delimiter.
    #[must_use]
    pub fn path(&self) -> String {
        self.path_delim(self.tree.config().delimiter())
    }

    /// The path from the root to this node, joined with `delim`.
    ///
    /// A root whose name equals the delimiter contributes an empty segment, so
    /// the delimiter is not doubled: a root named `/` with a child `a` gives
    /// `/a`.
    ///
    /// ```
    /// use dirtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.new_root("/");
    /// let a = tree.add(root, "a").unwrap();
    /// let b = tree.add(a, "b").unwrap();
    ///
    /// let b = tree.node(b).unwrap();
    /// assert_eq!(b.path(), "/a/b");
    /// assert_eq!(b.path_delim("."), "/.a.b");
    /// ```
    #[must_use]
    pub fn path_delim(&self, delim: &str) -> String {
        let mut parts: Vec<&str> = std::iter::once(*self)
            .chain(self.ancestors())
            .map(|node| node.name())
            .collect();
        parts.reverse();

        if parts.first() == Some(&delim) {
            parts[0] = "";
        }

        parts.join(delim)
    }

    /// Renders the subtree rooted at this node, in the style of the `tree`
    /// utility.
    ///
    /// Children are listed in ascending name order at every level. The output
    /// has no trailing newline.
    ///
    /// ```
    /// use dirtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.new_root(".");
    /// let a = tree.add(root, "A").unwrap();
    /// tree.add(a, "Ax").unwrap();
    /// tree.add(root, "B").unwrap();
    ///
    /// assert_eq!(
    ///     tree.node(root).unwrap().tree(),
    ///     ".\n|-- A\n|   `-- Ax\n`-- B"
    /// );
    /// ```
    #[must_use]
    pub fn tree(&self) -> String {
        render::render(*self)
    }

    fn iter_children(&self) -> impl Iterator<Item = Self> + use<'a> {
        let tree = self.tree;
        self.data
            .children
            .values()
            .filter_map(move |&child| tree.node(child))
    }
}

impl fmt::Display for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("name", &self.data.name)
            .field("parent", &self.data.parent)
            .field("children", &self.data.children.len())
            .finish_non_exhaustive()
    }
}

/// Iterator over the ancestors of a node.
///
/// Returned by [`NodeView::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<NodeView<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
