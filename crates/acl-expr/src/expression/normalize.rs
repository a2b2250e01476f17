//! Canonicalisation of expression trees.

use super::fold::fold_post_order;
use super::{Expression, merge};

/// Fold already-normalised `children` into a copy of `node`.
///
/// Empty children are dropped. A plain single-recipient child becomes a
/// recipient of this node; any other child goes through [`merge`].
fn collapse(node: &Expression, children: Vec<Expression>) -> Expression {
    let seed = Expression {
        operator: node.operator,
        recipients: node.recipients.clone(),
        children: Vec::new(),
    };
    children
        .into_iter()
        .filter(|child| !child.is_empty())
        .fold(seed, |acc, child| match child.into_lone_recipient() {
            Ok(recipient) => acc.absorb(recipient),
            Err(child) => merge(acc, child),
        })
}

/// Return a canonical copy of `expr`.
///
/// Children left with neither recipients nor children are dropped, innermost
/// first, so emptiness propagates outwards. Surviving children are then
/// folded into their parent: a non-`NOT` child holding exactly one recipient
/// becomes a recipient of the parent, a child sharing the parent's binary
/// operator is spliced in, and anything else stays nested. `NOT` nodes are
/// never collapsed.
///
/// The root itself is never removed, even when empty. The function is
/// idempotent and walks the tree with an explicit stack.
///
/// # Examples
///
/// ```
/// use acl_expr::{Expression, OperatorKind, Recipient, normalize};
///
/// let alice = Recipient::user("alice").unwrap();
/// let tree = Expression::new(OperatorKind::Or)
///     .with_child(Expression::new(OperatorKind::And))
///     .with_child(Expression::from_recipient(OperatorKind::And, alice.clone()));
/// let canonical = normalize(&tree);
/// assert_eq!(canonical.recipients(), &[alice]);
/// assert!(canonical.children().is_empty());
/// ```
#[must_use]
pub fn normalize(expr: &Expression) -> Expression {
    fold_post_order(expr, collapse)
}
