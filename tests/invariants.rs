//! Property tests: structural invariants hold across arbitrary edit sequences.

use std::collections::BTreeSet;

use dirtree::{sort, sort_reverse, NodeId, NodeView, Tree};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    NewRoot(String),
    Add(usize, String),
    Make(usize, Vec<String>),
    Move(usize, usize),
    Rename(usize, String),
    Unlink(usize),
    Remove(usize),
}

/// Names drawn from a small alphabet so collisions are common, plus the two
/// reserved values.
fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        1 => Just("/".to_string()),
        8 => "[a-c]{1,2}",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => name().prop_map(Op::NewRoot),
        6 => (any::<usize>(), name()).prop_map(|(i, n)| Op::Add(i, n)),
        2 => (any::<usize>(), prop::collection::vec(name(), 0..4))
            .prop_map(|(i, names)| Op::Make(i, names)),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(i, j)| Op::Move(i, j)),
        3 => (any::<usize>(), name()).prop_map(|(i, n)| Op::Rename(i, n)),
        2 => any::<usize>().prop_map(Op::Unlink),
        1 => any::<usize>().prop_map(Op::Remove),
    ]
}

/// Every root's rendering, sorted, as a comparable picture of the forest.
fn snapshot(tree: &Tree) -> Vec<String> {
    let mut rendered: Vec<String> = tree.roots().map(|root| root.tree()).collect();
    rendered.sort();
    rendered
}

fn pick(ids: &[NodeId], index: usize) -> NodeId {
    ids[index % ids.len()]
}

/// Applies `op`, returning whether the tree reported a recoverable error.
fn apply(tree: &mut Tree, ids: &mut Vec<NodeId>, op: &Op) -> bool {
    match op {
        Op::NewRoot(name) => {
            ids.push(tree.new_root(name.as_str()));
            false
        }
        Op::Add(i, name) => match tree.add(pick(ids, *i), name) {
            Ok(id) => {
                ids.push(id);
                false
            }
            Err(_) => true,
        },
        Op::Make(i, names) => match tree.make(pick(ids, *i), names) {
            Ok(created) => {
                ids.extend(created);
                false
            }
            Err(_) => true,
        },
        Op::Move(i, j) => tree.move_to(pick(ids, *i), pick(ids, *j)).is_err(),
        Op::Rename(i, name) => tree.rename(pick(ids, *i), name).is_err(),
        Op::Unlink(i) => {
            tree.unlink(pick(ids, *i));
            false
        }
        Op::Remove(i) => {
            tree.remove(pick(ids, *i));
            false
        }
    }
}

proptest! {
    #[test]
    fn edits_preserve_invariants(ops in prop::collection::vec(op(), 1..60)) {
        let mut tree = Tree::new();
        let mut ids = vec![tree.new_root("")];

        for op in &ops {
            let before = snapshot(&tree);
            let len = tree.len();

            let failed = apply(&mut tree, &mut ids, op);

            prop_assert!(tree.verify().is_ok(), "{op:?} broke the tree: {:?}", tree.verify());
            if failed {
                prop_assert_eq!(tree.len(), len);
                prop_assert_eq!(snapshot(&tree), before);
            }
        }
    }

    #[test]
    fn sort_and_sort_reverse_are_inverses(
        names in prop::collection::btree_set("[a-zA-Z0-9-]{1,6}", 0..20)
    ) {
        let mut tree = Tree::new();
        let root = tree.new_root("");
        tree.make(root, &names).unwrap();

        let mut children = tree.node(root).unwrap().children();
        sort(&mut children);
        let ascending: Vec<NodeId> = children.iter().map(NodeView::id).collect();
        let ascending_names: Vec<&str> = children.iter().map(NodeView::name).collect();
        prop_assert_eq!(ascending_names, names.iter().map(String::as_str).collect::<Vec<_>>());

        sort_reverse(&mut children);
        let mut descending: Vec<NodeId> = children.iter().map(NodeView::id).collect();
        descending.reverse();
        prop_assert_eq!(&descending, &ascending);

        sort(&mut children);
        let resorted: Vec<NodeId> = children.iter().map(NodeView::id).collect();
        prop_assert_eq!(resorted, ascending);
    }

    #[test]
    fn path_joins_chain_of_names(chain in prop::collection::vec("[a-z]{1,5}", 1..8)) {
        let mut tree = Tree::new();
        let mut current = tree.new_root("/");
        for name in &chain {
            current = tree.add(current, name).unwrap();
        }

        let expected = format!("/{}", chain.join("/"));
        prop_assert_eq!(tree.node(current).unwrap().path(), expected);
    }

    #[test]
    fn list_matches_sorted_names(names in prop::collection::btree_set("[a-z]{1,4}", 0..16)) {
        let mut tree = Tree::new();
        let root = tree.new_root("");
        for name in names.iter().rev() {
            tree.add(root, name).unwrap();
        }

        let listed: BTreeSet<&str> = tree.node(root).unwrap().list().into_iter().collect();
        prop_assert_eq!(listed.len(), names.len());
        prop_assert_eq!(
            tree.node(root).unwrap().list(),
            names.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rendering_is_idempotent(ops in prop::collection::vec(op(), 1..30)) {
        let mut tree = Tree::new();
        let mut ids = vec![tree.new_root(".")];
        for op in &ops {
            apply(&mut tree, &mut ids, op);
        }

        for root in tree.roots() {
            prop_assert_eq!(root.tree(), root.tree());
        }
    }
}
