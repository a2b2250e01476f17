//! Regeneration of the postfix token form.

use super::Expression;
use crate::operator::OperatorKind;
use crate::recipient::Recipient;

enum Step<'a> {
    Visit(&'a Expression),
    Recipient(&'a Recipient),
    Operator(OperatorKind),
}

/// Postfix steps for one node, in emission order.
///
/// Operands are the node's recipients followed by its children. A binary
/// operator is written after every operand but the first, so an `AND` over
/// three recipients reads `a b AND c AND`. A unary operator follows each
/// operand; a well-formed `NOT` node has exactly one.
fn expand(node: &Expression) -> Vec<Step<'_>> {
    let operands = node
        .recipients
        .iter()
        .map(Step::Recipient)
        .chain(node.children.iter().map(Step::Visit));
    let mut steps = Vec::with_capacity(node.operand_count() * 2);
    for (index, operand) in operands.enumerate() {
        steps.push(operand);
        if node.operator.is_unary() || index > 0 {
            steps.push(Step::Operator(node.operator));
        }
    }
    steps
}

/// Produce the postfix tokens for `expr`.
///
/// The tree must not contain empty non-root nodes; run [`normalize`](crate::normalize)
/// first when the tree was built by hand.
///
/// # Examples
///
/// ```
/// use acl_expr::{parse, to_tokens};
///
/// let expr = parse("U:a U:b AND U:c OR").unwrap();
/// assert_eq!(to_tokens(&expr), vec!["U:c", "U:a", "U:b", "AND", "OR"]);
/// ```
#[must_use]
pub fn to_tokens(expr: &Expression) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut stack = vec![Step::Visit(expr)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(node) => stack.extend(expand(node).into_iter().rev()),
            Step::Recipient(recipient) => tokens.push(recipient.to_string()),
            Step::Operator(operator) => tokens.push(operator.keyword().to_owned()),
        }
    }
    tokens
}

/// Render `expr` as a canonical postfix string.
///
/// Tokens are joined by single spaces. Parsing the result of serialising a
/// normalised tree yields a tree equal to it.
///
/// # Examples
///
/// ```
/// use acl_expr::{Expression, OperatorKind, Recipient, serialize};
///
/// let everyone = Expression::from_recipient(OperatorKind::Or, Recipient::everyone());
/// assert_eq!(serialize(&everyone), "*");
///
/// let not_owner = Expression::from_recipient(OperatorKind::Not, Recipient::owner());
/// assert_eq!(serialize(&not_owner), "$OWNER NOT");
/// ```
#[must_use]
pub fn serialize(expr: &Expression) -> String {
    to_tokens(expr).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::test_support::{and, not, or};
    use crate::recipient::Recipient;
    use rstest::rstest;

    #[rstest]
    #[case(or(&["a"]), "U:a")]
    #[case(and(&["a"]), "U:a")]
    #[case(not(&["a"]), "U:a NOT")]
    #[case(and(&["a", "b"]), "U:a U:b AND")]
    #[case(and(&["a", "b", "c"]), "U:a U:b AND U:c AND")]
    #[case(or(&["a", "b", "c", "d"]), "U:a U:b OR U:c OR U:d OR")]
    #[case(or(&["c"]).with_child(and(&["a", "b"])), "U:c U:a U:b AND OR")]
    #[case(not(&[]).with_child(and(&["a", "b"])), "U:a U:b AND NOT")]
    #[case(or(&[]).with_child(not(&["a"])).with_child(not(&["b"])), "U:a NOT U:b NOT OR")]
    #[case(
        and(&[]).with_child(or(&["a", "b"])).with_child(or(&["c", "d"])),
        "U:a U:b OR U:c U:d OR AND"
    )]
    #[case(not(&[]).with_child(not(&["a"])), "U:a NOT NOT")]
    #[case(or(&[]), "")]
    fn serialises_postfix(#[case] expr: Expression, #[case] expected: &str) {
        assert_eq!(serialize(&expr), expected);
    }

    #[test]
    fn renders_self_contained_recipients_alone() {
        let everyone = Expression::from_recipient(OperatorKind::Or, Recipient::everyone());
        let owner = Expression::from_recipient(OperatorKind::Or, Recipient::owner());
        assert_eq!(serialize(&everyone), "*");
        assert_eq!(serialize(&owner), "$OWNER");
    }

    #[test]
    fn display_matches_serialize() {
        let expr = and(&["a", "b"]).with_child(not(&["c"]));
        assert_eq!(expr.to_string(), "U:a U:b AND U:c NOT AND");
    }

    #[test]
    fn never_leaves_trailing_whitespace() {
        let expr = or(&["a", "b"]).with_child(and(&["c", "d"]));
        let text = serialize(&expr);
        assert_eq!(text.trim(), text);
        assert!(!text.contains("  "));
    }
}
