//! Behavioural properties of the public parse, normalise and serialise API.
#![expect(clippy::expect_used, reason = "tests assert on fallible parsing")]

use acl_expr::{
    AclError, Expression, OperatorKind, Recipient, RecipientKind, canonicalize, normalize, parse,
    serialize,
};
use rstest::rstest;

fn parse_ok(input: &str) -> Expression {
    parse(input).expect("expression should parse")
}

fn ids(expr: &Expression) -> Vec<&str> {
    expr.recipients().iter().map(Recipient::raw_value).collect()
}

#[test]
fn binary_operator_consumes_two_recipients() {
    let expr = parse_ok("U:a U:b AND");
    assert_eq!(expr.operator(), OperatorKind::And);
    assert_eq!(ids(&expr), vec!["a", "b"]);
    assert!(expr.children().is_empty());
}

#[test]
fn negation_consumes_one_recipient() {
    let expr = parse_ok("U:a NOT");
    assert_eq!(expr.operator(), OperatorKind::Not);
    assert_eq!(ids(&expr), vec!["a"]);
    assert!(expr.children().is_empty());
}

#[test]
fn single_recipient_is_wrapped_in_or() {
    let expr = parse_ok("U:alice");
    assert_eq!(expr.operator(), OperatorKind::Or);
    assert!(expr.children().is_empty());
    let [alice] = expr.recipients() else {
        panic!("expected exactly one recipient, got {:?}", expr.recipients());
    };
    assert_eq!(alice.kind(), RecipientKind::User);
    assert_eq!(alice.raw_value(), "alice");
}

#[test]
fn repeated_operator_merges_flat() {
    let expr = parse_ok("U:a U:b AND U:c AND");
    assert_eq!(expr.operator(), OperatorKind::And);
    assert_eq!(ids(&expr), vec!["a", "b", "c"]);
    assert!(expr.children().is_empty());
}

#[test]
fn differing_operator_nests_before_and_after_normalising() {
    let parsed = parse_ok("U:a U:b AND U:c OR");
    let expected = Expression::from_recipient(
        OperatorKind::Or,
        Recipient::user("c").expect("valid user"),
    )
    .with_child(
        Expression::new(OperatorKind::And)
            .with_recipient(Recipient::user("a").expect("valid user"))
            .with_recipient(Recipient::user("b").expect("valid user")),
    );

    assert_eq!(parsed, expected, "shape straight out of the parser");
    assert_eq!(normalize(&parsed), expected, "shape after normalising");
}

#[test]
fn aggregates_all_invalid_tokens() {
    let err = parse("U:a XX:b YY AND").expect_err("invalid tokens should fail");
    assert_eq!(err.invalid_tokens(), vec!["XX:b", "YY"]);
    let message = err.to_string();
    assert!(message.contains("XX:b"), "{message}");
    assert!(message.contains("YY"), "{message}");
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_input_is_empty_expression(#[case] input: &str) {
    assert_eq!(parse(input), Err(AclError::EmptyExpression));
}

#[test]
fn operand_underflow_is_a_hard_error() {
    assert!(matches!(
        parse("U:a AND"),
        Err(AclError::OperandUnderflow {
            operator: OperatorKind::And,
            required: 2,
            available: 1,
            ..
        })
    ));
}

#[rstest]
#[case(Recipient::everyone(), "*")]
#[case(Recipient::owner(), "$OWNER")]
fn self_contained_recipients_serialise_bare(
    #[case] recipient: Recipient,
    #[case] expected: &str,
) {
    let expr = Expression::from_recipient(OperatorKind::Or, recipient);
    assert_eq!(serialize(&expr), expected);
}

#[test]
fn canonical_form_is_stable() {
    let once = canonicalize("U:a   U:b AND U:c OR").expect("expression should parse");
    assert_eq!(once, "U:c U:a U:b AND OR");
    assert_eq!(canonicalize(&once).expect("canonical form parses"), once);
}
