//! Ordering of node views by display name.
//!
//! These functions do not rely on any tree invariant and may be applied to
//! arbitrary collections of views, including views from different parents.

use std::cmp::Ordering;

use crate::domain::NodeView;

/// Compares two nodes by display name.
///
/// An unnamed root compares as the root marker `/`.
#[must_use]
pub fn by_name(a: &NodeView<'_>, b: &NodeView<'_>) -> Ordering {
    a.display_name().cmp(b.display_name())
}

/// Sorts `nodes` in place, from a to z.
pub fn sort(nodes: &mut [NodeView<'_>]) {
    nodes.sort_by(by_name);
}

/// Sorts `nodes` in place, from z to a.
pub fn sort_reverse(nodes: &mut [NodeView<'_>]) {
    nodes.sort_by(|a, b| by_name(b, a));
}
