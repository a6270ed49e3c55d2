// Text rendering of a subtree, in the style of the UNIX `tree` utility.

use crate::domain::{ordering, NodeView};

/// Connector for a node with following siblings.
const LINK: &str = "|-- ";
/// Indent under an ancestor with following siblings.
const CONTINUE: &str = "|   ";
/// Connector for the last node at its level.
const END: &str = "`-- ";
/// Indent under an ancestor that was last at its level.
const BLANK: &str = "    ";

enum Entry<'a> {
    Node(NodeView<'a>),
    /// Marks the end of a level; pops one indent segment.
    Ascend,
}

/// Renders the subtree rooted at `root`.
///
/// Depth-first, pre-order. Children are pushed in descending name order so
/// that popping the stack yields them in ascending order.
pub fn render(root: NodeView<'_>) -> String {
    let mut lines = vec![root.display_name().to_string()];
    let mut stack = descending_children(root);
    let mut indent: Vec<&'static str> = Vec::new();

    while let Some(entry) = stack.pop() {
        let node = match entry {
            Entry::Node(node) => node,
            Entry::Ascend => {
                indent.pop();
                continue;
            }
        };

        let last = matches!(stack.last(), None | Some(Entry::Ascend));
        let connector = if last { END } else { LINK };
        lines.push(format!("{}{connector}{}", indent.concat(), node.name()));

        if !node.is_empty() {
            indent.push(if last { BLANK } else { CONTINUE });
            stack.push(Entry::Ascend);
            stack.extend(descending_children(node));
        }
    }

    lines.join("\n")
}

fn descending_children(node: NodeView<'_>) -> Vec<Entry<'_>> {
    let mut children = node.children();
    ordering::sort_reverse(&mut children);
    children.into_iter().map(Entry::Node).collect()
}
