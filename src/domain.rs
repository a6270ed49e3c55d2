//! Domain types for named-node trees.
//!
//! This module contains the tree arena, node handles and views, name
//! validation, ordering, rendering and configuration.

mod config;
pub use config::{Config, ConfigError};

/// Validated child names and the reserved root marker.
pub mod name;
pub use name::{InvalidNameError, Name, ROOT_MARKER};

mod node;
pub use node::NodeId;

mod node_view;
pub use node_view::{Ancestors, NodeView};

/// Sorting of node views by display name.
pub mod ordering;
pub use ordering::{sort, sort_reverse};

mod render;

/// The tree arena and its editing operations.
pub mod tree;
pub use tree::{Error, IntegrityError, Tree};
