//! The expression tree and its construction and merge primitives.

mod fold;
mod normalize;
mod serialize;

use std::collections::HashMap;
use std::{fmt, mem};

use crate::operator::OperatorKind;
use crate::recipient::Recipient;
use crate::resolve::RecipientResolver;

use fold::fold_post_order;

pub use normalize::normalize;
pub use serialize::{serialize, to_tokens};

/// A node of an ACL expression: an operator applied to recipients and to
/// nested child expressions.
///
/// Each node owns its recipients and children outright. Transformations
/// such as [`merge`] and [`normalize`] return new trees instead of mutating
/// shared ones. Recipients and children keep their insertion order so that
/// serialisation is stable, although order carries no meaning for `AND` and
/// `OR`; [`Expression::is_equivalent`] compares them as multisets.
///
/// Cloning, comparison and dropping walk the tree with explicit stacks, so
/// they cope with nesting of any depth. `Debug` output and the optional
/// `Serialize` impl recurse per level.
///
/// # Examples
///
/// ```
/// use acl_expr::{Expression, OperatorKind, Recipient};
///
/// let expr = Expression::new(OperatorKind::And)
///     .with_recipient(Recipient::user("alice").unwrap())
///     .with_recipient(Recipient::group("staff").unwrap());
/// assert_eq!(expr.to_string(), "U:alice G:staff AND");
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expression {
    operator: OperatorKind,
    recipients: Vec<Recipient>,
    children: Vec<Expression>,
}

impl Expression {
    /// Create an operator node with no operands.
    #[must_use]
    pub const fn new(operator: OperatorKind) -> Self {
        Self {
            operator,
            recipients: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an operator node holding a single recipient.
    #[must_use]
    pub fn from_recipient(operator: OperatorKind, recipient: Recipient) -> Self {
        Self {
            operator,
            recipients: vec![recipient],
            children: Vec::new(),
        }
    }

    /// Append a recipient operand.
    #[must_use]
    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    /// Append a child expression operand without flattening it.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// The operator joining this node's operands.
    #[must_use]
    pub const fn operator(&self) -> OperatorKind {
        self.operator
    }

    /// Recipients held directly by this node.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Child expressions held by this node.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` when the node has neither recipients nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty() && self.children.is_empty()
    }

    /// Number of direct operands: recipients plus children.
    #[must_use]
    pub fn operand_count(&self) -> usize {
        self.recipients.len() + self.children.len()
    }

    /// Add a bare recipient operand.
    ///
    /// This is the merge rule for a recipient that has not yet been combined
    /// by an explicit operator: it always joins the base's recipients.
    #[must_use]
    pub fn absorb(self, recipient: Recipient) -> Self {
        self.with_recipient(recipient)
    }

    /// Unwrap a node standing for one plain recipient.
    ///
    /// Succeeds for a non-unary node with exactly one recipient and no
    /// children; anything else is handed back untouched.
    pub(crate) fn into_lone_recipient(mut self) -> Result<Recipient, Self> {
        if self.operator.is_unary() || !self.children.is_empty() || self.recipients.len() != 1 {
            return Err(self);
        }
        self.recipients.pop().ok_or(self)
    }

    /// Compare two trees as the evaluator sees them.
    ///
    /// Operators must match, and recipients and children must be equal as
    /// multisets, recursively. Display names are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::parse;
    ///
    /// let left = parse("U:a U:b OR").unwrap();
    /// let right = parse("U:b U:a OR").unwrap();
    /// assert_ne!(left, right);
    /// assert!(left.is_equivalent(&right));
    /// ```
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        let [ours, theirs] = shape_ids([self, other]);
        ours == theirs
    }

    /// Depth-first, pre-order traversal of every node with its depth.
    ///
    /// The root is reported at depth zero. The walk uses an explicit stack,
    /// so arbitrarily deep trees do not exhaust the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::{OperatorKind, parse};
    ///
    /// let expr = parse("U:a U:b AND U:c OR").unwrap();
    /// let operators: Vec<_> = expr.walk().map(|(depth, node)| (depth, node.operator())).collect();
    /// assert_eq!(operators, vec![(0, OperatorKind::Or), (1, OperatorKind::And)]);
    /// ```
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Iterate over every recipient in the tree, in pre-order.
    pub fn all_recipients(&self) -> impl Iterator<Item = &Recipient> {
        self.walk().flat_map(|(_, node)| node.recipients.iter())
    }

    /// Return a copy of the tree with display names filled in by `resolver`.
    ///
    /// Recipients the resolver does not know keep their current name.
    #[must_use]
    pub fn resolve_display_names<R>(&self, resolver: &R) -> Self
    where
        R: RecipientResolver + ?Sized,
    {
        let mut resolved = self.clone();
        let mut stack = vec![&mut resolved];
        while let Some(node) = stack.pop() {
            for recipient in &mut node.recipients {
                if let Some(name) = resolver.resolve(recipient) {
                    recipient.set_display_name(name);
                }
            }
            stack.extend(node.children.iter_mut());
        }
        resolved
    }
}

/// Combine `incoming` into `base`.
///
/// When both share a binary operator the incoming operands are spliced into
/// `base` (duplicates are kept). Otherwise `incoming` becomes one new child
/// of `base`. The result always carries the base operator. A unary base never
/// flattens, so `NOT` applied to a `NOT` stays nested.
///
/// # Examples
///
/// ```
/// use acl_expr::{Expression, OperatorKind, Recipient, merge};
///
/// let a = Expression::from_recipient(OperatorKind::And, Recipient::user("a").unwrap());
/// let b = Expression::from_recipient(OperatorKind::And, Recipient::user("b").unwrap());
/// let flat = merge(a.clone(), b);
/// assert_eq!(flat.recipients().len(), 2);
///
/// let c = Expression::from_recipient(OperatorKind::Or, Recipient::user("c").unwrap());
/// let nested = merge(a, c);
/// assert_eq!(nested.children().len(), 1);
/// ```
#[must_use]
pub fn merge(mut base: Expression, mut incoming: Expression) -> Expression {
    if base.operator.flattens(incoming.operator) {
        base.children.append(&mut incoming.children);
        base.recipients.append(&mut incoming.recipients);
    } else {
        base.children.push(incoming);
    }
    base
}

/// Order-insensitive node signature: operator, sorted recipients and the
/// sorted shape ids of the children.
type Shape<'a> = (OperatorKind, Vec<&'a Recipient>, Vec<usize>);

/// Number every distinct subtree shape across `trees`, bottom-up.
///
/// Two subtrees receive the same id exactly when they are equivalent, so
/// comparing the roots' ids decides equivalence of the whole trees.
fn shape_ids<'a, const N: usize>(trees: [&'a Expression; N]) -> [usize; N] {
    let mut shapes: HashMap<Shape<'a>, usize> = HashMap::new();
    trees.map(|tree| {
        fold_post_order(tree, |node: &'a Expression, mut children: Vec<usize>| {
            let mut recipients: Vec<&'a Recipient> = node.recipients.iter().collect();
            recipients.sort();
            children.sort_unstable();
            let next = shapes.len();
            *shapes
                .entry((node.operator, recipients, children))
                .or_insert(next)
        })
    })
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        fold_post_order(self, |node, children| Self {
            operator: node.operator,
            recipients: node.recipients.clone(),
            children,
        })
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((ours, theirs)) = pending.pop() {
            if ours.operator != theirs.operator
                || ours.recipients != theirs.recipients
                || ours.children.len() != theirs.children.len()
            {
                return false;
            }
            pending.extend(ours.children.iter().zip(&theirs.children));
        }
        true
    }
}

impl Eq for Expression {}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`Expression::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Expression)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Expression);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
