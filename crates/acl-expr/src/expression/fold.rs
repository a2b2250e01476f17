//! Bottom-up traversal with an explicit stack.

use std::{mem, slice};

use super::Expression;

/// A node whose children are still being folded.
struct Frame<'a, T> {
    node: &'a Expression,
    pending: slice::Iter<'a, Expression>,
    folded: Vec<T>,
}

impl<'a, T> Frame<'a, T> {
    fn enter(node: &'a Expression) -> Self {
        Self {
            node,
            pending: node.children.iter(),
            folded: Vec::with_capacity(node.children.len()),
        }
    }
}

/// Fold `root` in post-order.
///
/// `finish` sees each node together with the folded values of its children,
/// in child order, and its result is handed to the parent. The value
/// produced for `root` is returned. Depth is bounded only by memory.
pub(crate) fn fold_post_order<'a, T, F>(root: &'a Expression, mut finish: F) -> T
where
    F: FnMut(&'a Expression, Vec<T>) -> T,
{
    let mut ancestors: Vec<Frame<'a, T>> = Vec::new();
    let mut frame = Frame::enter(root);
    loop {
        if let Some(child) = frame.pending.next() {
            ancestors.push(mem::replace(&mut frame, Frame::enter(child)));
            continue;
        }
        let value = finish(frame.node, frame.folded);
        match ancestors.pop() {
            Some(parent) => {
                frame = parent;
                frame.folded.push(value);
            }
            None => return value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::test_support::{and, not, or};

    #[test]
    fn children_are_folded_before_their_parent() {
        let tree = or(&["a"])
            .with_child(and(&["b"]).with_child(not(&["c"])))
            .with_child(not(&["d"]));
        let mut order = Vec::new();
        let count = fold_post_order(&tree, |node, children: Vec<usize>| {
            order.push(node.operator().to_string());
            1 + children.iter().sum::<usize>()
        });
        assert_eq!(count, 4);
        assert_eq!(order, vec!["NOT", "AND", "NOT", "OR"]);
    }

    #[test]
    fn a_leaf_root_is_finished_immediately() {
        let height = fold_post_order(&and(&["a", "b"]), |_, children: Vec<usize>| {
            children.into_iter().max().map_or(1, |deepest| deepest + 1)
        });
        assert_eq!(height, 1);
    }
}
