//! Generative checks of the round-trip and idempotence laws.

use acl_expr::{Expression, OperatorKind, Recipient, canonicalize, normalize, parse, serialize};
use proptest::collection::vec;
use proptest::prelude::*;

/// A token for every recipient kind, including values with inner colons.
fn recipient_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "U:[a-z][a-z0-9._-]{0,6}",
        "G:[a-z]{1,6}",
        "R:ROLE_[A-Z]{1,5}",
        "F:https://[a-z]{1,5}\\.example/[a-z*]{0,4}",
        "I:10\\.[0-9]{1,3}\\.0\\.0/[0-9]{1,2}",
        "T:[a-z]{1,4}:[a-z]{1,4}",
        Just("*".to_owned()),
        Just("$OWNER".to_owned()),
    ]
}

/// Well-formed postfix text: every operator receives exactly its arity and
/// a single operand is left at the end.
fn postfix_expression() -> impl Strategy<Value = String> {
    recipient_token().prop_recursive(8, 64, 2, |operand| {
        prop_oneof![
            operand.clone().prop_map(|inner| format!("{inner} NOT")),
            (operand.clone(), operand, prop_oneof![Just("AND"), Just("OR")])
                .prop_map(|(left, right, keyword)| format!("{left} {right} {keyword}")),
        ]
    })
}

fn operator() -> impl Strategy<Value = OperatorKind> {
    prop_oneof![
        Just(OperatorKind::And),
        Just(OperatorKind::Or),
        Just(OperatorKind::Not),
    ]
}

fn recipient() -> impl Strategy<Value = Recipient> {
    recipient_token().prop_filter_map("token should name a recipient", |token| token.parse().ok())
}

fn node(operator: OperatorKind, recipients: Vec<Recipient>) -> Expression {
    recipients
        .into_iter()
        .fold(Expression::new(operator), Expression::with_recipient)
}

/// Hand-built trees with no shape guarantees: nodes may be empty, hold a
/// single operand, or nest the same operator directly.
fn any_tree() -> impl Strategy<Value = Expression> {
    let leaf = (operator(), vec(recipient(), 0..3))
        .prop_map(|(operator, recipients)| node(operator, recipients));
    leaf.prop_recursive(5, 48, 4, |subtree| {
        (operator(), vec(recipient(), 0..3), vec(subtree, 0..4)).prop_map(
            |(operator, recipients, children)| {
                children
                    .into_iter()
                    .fold(node(operator, recipients), Expression::with_child)
            },
        )
    })
}

fn parsed(input: &str) -> Result<Expression, TestCaseError> {
    parse(input).map_err(|err| TestCaseError::fail(format!("{input:?} should parse: {err}")))
}

proptest! {
    #[test]
    fn normal_form_survives_serialise_and_reparse(input in postfix_expression()) {
        let normal = normalize(&parsed(&input)?);
        let text = serialize(&normal);
        let reparsed = parsed(&text)?;
        prop_assert_eq!(reparsed, normal, "{:?} serialised as {:?}", input, text);
    }

    #[test]
    fn canonical_text_is_a_fixed_point(input in postfix_expression()) {
        let once = canonicalize(&input)
            .map_err(|err| TestCaseError::fail(format!("{input:?} should canonicalise: {err}")))?;
        let twice = canonicalize(&once)
            .map_err(|err| TestCaseError::fail(format!("{once:?} should canonicalise: {err}")))?;
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalising_twice_changes_nothing(tree in any_tree()) {
        let once = normalize(&tree);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normal_form_has_no_empty_or_plain_singleton_children(tree in any_tree()) {
        let normal = normalize(&tree);
        for (_, parent) in normal.walk() {
            for child in parent.children() {
                prop_assert!(!child.is_empty(), "empty child left in {:?}", normal);
                let plain_singleton = !child.operator().is_unary()
                    && child.children().is_empty()
                    && child.recipients().len() == 1;
                prop_assert!(!plain_singleton, "singleton child left in {:?}", normal);
                prop_assert!(
                    !parent.operator().flattens(child.operator()),
                    "unspliced child left in {:?}",
                    normal
                );
            }
        }
    }
}
