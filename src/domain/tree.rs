//! In-memory arena of named nodes.
//!
//! The [`Tree`] owns every node and hands out copyable [`NodeId`] handles.
//! Each node stores its name, a non-owning handle to its parent, and a
//! name-keyed map of children. All structural edits go through the tree so
//! that the parent and child links always agree:
//!
//! - every child is listed by its parent under its own name;
//! - siblings have distinct names;
//! - only roots may be unnamed;
//! - the parent links form a forest (no cycles).
//!
//! Detaching a node does not drop it: it stays in the arena as a new root,
//! together with its subtree, until [`Tree::remove`] is called.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::domain::{
    name::{InvalidNameError, Name, ROOT_MARKER},
    node::{NodeData, NodeId},
    Config, NodeView,
};

/// An arena of named nodes forming one or more trees.
#[derive(Debug, Default)]
pub struct Tree {
    config: Config,

    /// All live nodes, keyed by handle. Roots and detached subtrees live
    /// here too.
    nodes: HashMap<NodeId, NodeData>,
}

/// Errors that can occur when editing a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The name is empty or the reserved root marker, where a child name is
    /// required.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),
    /// A sibling, or a child of the destination, already has this name.
    #[error("entry '{0}' already exists")]
    AlreadyExists(String),
    /// Only roots may be unnamed.
    #[error("non-root node must have a name")]
    InvalidNameForNonRoot,
    /// Moving the node would make it its own ancestor.
    #[error("moving {node} under {destination} would create a cycle")]
    Cycle {
        /// The node being moved.
        node: NodeId,
        /// The requested destination, which is the node or one of its
        /// descendants.
        destination: NodeId,
    },
    /// The handle does not refer to a node in this tree.
    #[error("node {0} not found")]
    UnknownNode(NodeId),
}

/// A structural inconsistency found by [`Tree::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// A node's parent handle does not resolve.
    #[error("node {child} refers to missing parent {parent}")]
    MissingParent {
        /// The node holding the dangling parent handle.
        child: NodeId,
        /// The missing parent.
        parent: NodeId,
    },
    /// A parent's child map holds a handle that does not resolve.
    #[error("node {parent} lists missing child {child} as '{name}'")]
    MissingChild {
        /// The listing parent.
        parent: NodeId,
        /// The missing child.
        child: NodeId,
        /// The key it is listed under.
        name: String,
    },
    /// A node is not listed by its parent under its own name.
    #[error("node {child} named '{name}' is not listed under that name by its parent {parent}")]
    Unlisted {
        /// The unlisted node.
        child: NodeId,
        /// Its parent.
        parent: NodeId,
        /// The node's name.
        name: String,
    },
    /// A child is listed by a node that is not its parent.
    #[error("node {listed_by} lists {child} as '{name}', but its parent is {parent:?}")]
    WrongParent {
        /// The listed node.
        child: NodeId,
        /// The node listing it.
        listed_by: NodeId,
        /// The key it is listed under.
        name: String,
        /// The child's actual parent.
        parent: Option<NodeId>,
    },
    /// A non-root node does not carry a valid child name.
    #[error("non-root node {child} has invalid name '{name}'")]
    InvalidChildName {
        /// The offending node.
        child: NodeId,
        /// Its name.
        name: String,
    },
    /// A node is its own ancestor.
    #[error("node {0} is its own ancestor")]
    Cycle(NodeId),
}

impl Tree {
    /// Creates an empty tree with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            nodes: HashMap::new(),
        }
    }

    /// Creates an empty tree with pre-allocated capacity for the given number
    /// of nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            config: Config::default(),
            nodes: HashMap::with_capacity(capacity),
        }
    }

    /// The tree's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The total number of nodes, across all roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the handle refers to a node in this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns a borrowed view of the node, or `None` for an unknown handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_>> {
        self.nodes
            .get_key_value(&id)
            .map(|(&id, data)| NodeView::new(self, id, data))
    }

    /// Iterates over every parentless node, in no particular order.
    pub fn roots(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(&id, data)| NodeView::new(self, id, data))
    }

    /// Creates a new root node.
    ///
    /// Any name is accepted, including the empty string (an unnamed root) and
    /// the root marker `/`.
    pub fn new_root(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::new();
        let data = NodeData::root(name.into());
        debug!(%id, root_name = %data.name, "created root");
        self.nodes.insert(id, data);
        id
    }

    /// Creates a child of `parent` with the given name.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `name` is empty or the root marker.
    /// - [`Error::AlreadyExists`] if `parent` already has a child with that
    ///   name.
    /// - [`Error::UnknownNode`] if `parent` is not in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, parent: NodeId, name: &str) -> Result<NodeId, Error> {
        let name = Name::try_from(name)?;
        if self.data(parent)?.children.contains_key(name.as_str()) {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let id = self.insert_child(parent, &name)?;
        debug!(%id, "added node");
        Ok(id)
    }

    /// Creates several children of `parent` at once.
    ///
    /// Every name is validated before any node is created, so either all the
    /// children are created or none are. Only the first rejected name is
    /// reported. Returns the new handles in the order the names were given.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if a name is empty or the root marker.
    /// - [`Error::AlreadyExists`] if a name is already taken by a child of
    ///   `parent`, or appears twice in `names`.
    /// - [`Error::UnknownNode`] if `parent` is not in the tree.
    #[instrument(level = "debug", skip(self, names))]
    pub fn make<I, S>(&mut self, parent: NodeId, names: I) -> Result<Vec<NodeId>, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let existing = &self.data(parent)?.children;

        let mut batch: Vec<Name> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for name in names {
            let name = Name::try_from(name.as_ref())?;
            if existing.contains_key(name.as_str()) || !seen.insert(name.to_string()) {
                return Err(Error::AlreadyExists(name.to_string()));
            }
            batch.push(name);
        }

        let created = batch
            .iter()
            .map(|name| self.insert_child(parent, name))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = created.len(), "added nodes");
        Ok(created)
    }

    /// Detaches the node from its parent.
    ///
    /// The node and its subtree stay in the arena as a new root. Returns
    /// `false` if the node is already a root, or is not in the tree.
    ///
    /// # Panics
    ///
    /// Panics if the parent does not list the node under the node's own name.
    /// That can only happen if the tree was already corrupt, and carrying on
    /// would leave it so.
    #[instrument(level = "debug", skip(self))]
    pub fn unlink(&mut self, id: NodeId) -> bool {
        let Some(data) = self.nodes.get(&id) else {
            return false;
        };
        let Some(parent) = data.parent else {
            return false;
        };
        let name = data.name.clone();

        match self.nodes.get_mut(&parent).map(|data| &mut data.children) {
            Some(siblings) if siblings.get(&name) == Some(&id) => {
                siblings.remove(&name);
            }
            _ => {
                error!(%id, %parent, child_name = %name, "parent has wrong entry for child");
                panic!("parent {parent} has wrong entry for child {id} named '{name}'");
            }
        }

        if let Some(data) = self.nodes.get_mut(&id) {
            data.parent = None;
        }

        debug!("unlinked node");
        true
    }

    /// Re-parents the node, with its whole subtree, under `destination`.
    ///
    /// On error the tree is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if the node is an unnamed root (or otherwise
    ///   carries a name no child may have).
    /// - [`Error::Cycle`] if `destination` is the node itself or one of its
    ///   descendants. Checked before name collisions.
    /// - [`Error::AlreadyExists`] if `destination` already has a child with the
    ///   node's name. This includes moving a node to its current parent.
    /// - [`Error::UnknownNode`] if either handle is not in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn move_to(&mut self, id: NodeId, destination: NodeId) -> Result<(), Error> {
        let name = Name::try_from(self.data(id)?.name.as_str())?;
        let taken = self.data(destination)?.children.contains_key(name.as_str());
        if self.is_ancestor_or_self(id, destination) {
            return Err(Error::Cycle {
                node: id,
                destination,
            });
        }
        if taken {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        self.unlink(id);
        self.data_mut(destination)?
            .children
            .insert(name.to_string(), id);
        self.data_mut(id)?.parent = Some(destination);

        debug!("moved node");
        Ok(())
    }

    /// Renames the node.
    ///
    /// The root marker `/` is treated as the empty name, which only a root may
    /// have. Renaming a node to its current name succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNameForNonRoot`] if the node has a parent and the new
    ///   name is empty.
    /// - [`Error::AlreadyExists`] if a sibling already has the new name.
    /// - [`Error::UnknownNode`] if the handle is not in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), Error> {
        let name = if name == ROOT_MARKER { "" } else { name };
        let data = self.data(id)?;

        if let Some(parent) = data.parent {
            if name.is_empty() {
                return Err(Error::InvalidNameForNonRoot);
            }
            if data.name == name {
                return Ok(());
            }
            let old = data.name.clone();

            let siblings = &mut self.data_mut(parent)?.children;
            if siblings.contains_key(name) {
                return Err(Error::AlreadyExists(name.to_string()));
            }
            siblings.remove(&old);
            siblings.insert(name.to_string(), id);
        }

        self.data_mut(id)?.name = name.to_string();
        debug!("renamed node");
        Ok(())
    }

    /// Detaches the node and drops it, together with its whole subtree.
    ///
    /// Handles to removed nodes become unknown to the tree. Returns `false` if
    /// the node is not in the tree.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Tree::unlink`].
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unlink(id);

        let mut removed = 0_usize;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(data) = self.nodes.remove(&next) {
                pending.extend(data.children.into_values());
                removed += 1;
            }
        }

        debug!(removed, "removed subtree");
        true
    }

    /// Checks the structural invariants of every node in the arena.
    ///
    /// The public editing operations maintain these invariants, so this only
    /// fails if the tree was corrupted some other way.
    ///
    /// # Errors
    ///
    /// Returns the first [`IntegrityError`] found.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        for (&id, data) in &self.nodes {
            if let Some(parent) = data.parent {
                let parent_data = self
                    .nodes
                    .get(&parent)
                    .ok_or(IntegrityError::MissingParent { child: id, parent })?;
                if Name::try_from(data.name.as_str()).is_err() {
                    return Err(IntegrityError::InvalidChildName {
                        child: id,
                        name: data.name.clone(),
                    });
                }
                if parent_data.children.get(&data.name) != Some(&id) {
                    return Err(IntegrityError::Unlisted {
                        child: id,
                        parent,
                        name: data.name.clone(),
                    });
                }
            }

            for (name, &child) in &data.children {
                let child_data = self
                    .nodes
                    .get(&child)
                    .ok_or_else(|| IntegrityError::MissingChild {
                        parent: id,
                        child,
                        name: name.clone(),
                    })?;
                if child_data.parent != Some(id) || &child_data.name != name {
                    return Err(IntegrityError::WrongParent {
                        child,
                        listed_by: id,
                        name: name.clone(),
                        parent: child_data.parent,
                    });
                }
            }

            if self.has_cycle_above(id) {
                return Err(IntegrityError::Cycle(id));
            }
        }
        Ok(())
    }

    fn data(&self, id: NodeId) -> Result<&NodeData, Error> {
        self.nodes.get(&id).ok_or(Error::UnknownNode(id))
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, Error> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))
    }

    /// Inserts a new child, linking it in both directions. The name must
    /// already have been checked against the parent's children.
    fn insert_child(&mut self, parent: NodeId, name: &Name) -> Result<NodeId, Error> {
        let id = NodeId::new();
        self.data_mut(parent)?
            .children
            .insert(name.to_string(), id);
        self.nodes
            .insert(id, NodeData::child(name.to_string(), parent));
        Ok(id)
    }

    /// Whether `ancestor` is `node` or lies on the path from `node` to its
    /// root.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|data| data.parent);
        }
        false
    }

    /// Walks up from `id`; a walk longer than the arena means a cycle.
    fn has_cycle_above(&self, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id).and_then(|data| data.parent);
        for _ in 0..self.nodes.len() {
            match current {
                None => return false,
                Some(parent) if parent == id => return true,
                Some(parent) => current = self.nodes.get(&parent).and_then(|data| data.parent),
            }
        }
        current.is_some()
    }
}
