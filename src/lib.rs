//! Mutable trees of named nodes.
//!
//! A [`Tree`] is an in-memory hierarchy, like a directory tree but
//! domain-agnostic. Nodes are addressed by [`NodeId`] handles; each node has a
//! name that is unique among its siblings, a parent (unless it is a root) and
//! any number of children.
//!
//! ```
//! use dirtree::Tree;
//!
//! let mut tree = Tree::new();
//! let root = tree.new_root(".");
//! let a = tree.add(root, "A")?;
//! tree.make(a, ["Ax", "Ay"])?;
//! let b = tree.add(root, "B")?;
//!
//! let root_view = tree.node(root).unwrap();
//! assert_eq!(root_view.list(), ["A", "B"]);
//! assert_eq!(root_view.find("Ay").unwrap().path(), "./A/Ay");
//!
//! tree.move_to(b, a)?;
//! assert_eq!(
//!     tree.node(root).unwrap().tree(),
//!     ".\n`-- A\n    |-- Ax\n    |-- Ay\n    `-- B"
//! );
//! # Ok::<(), dirtree::Error>(())
//! ```

pub mod domain;
pub use domain::{
    sort, sort_reverse, Config, ConfigError, Error, IntegrityError, Name, NodeId, NodeView, Tree,
    ROOT_MARKER,
};
