//! Boolean connectives used inside ACL expressions.

use std::fmt;

/// Operator joining the operands of an [`Expression`](crate::Expression).
///
/// A recipient token that no operator has consumed yet is represented by the
/// parser's own token type, so a finished tree only ever holds one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum OperatorKind {
    /// Every operand must hold.
    And,
    /// At least one operand must hold.
    Or,
    /// The single operand must not hold.
    Not,
}

impl OperatorKind {
    /// Return the postfix keyword for the operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::OperatorKind;
    ///
    /// assert_eq!(OperatorKind::And.keyword(), "AND");
    /// assert_eq!(OperatorKind::Not.keyword(), "NOT");
    /// ```
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Match a token against the operator keywords.
    ///
    /// Matching is case-sensitive, so `and` is not an operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::OperatorKind;
    ///
    /// assert_eq!(OperatorKind::from_keyword("OR"), Some(OperatorKind::Or));
    /// assert_eq!(OperatorKind::from_keyword("or"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Number of operands the operator consumes from the postfix stack.
    #[must_use]
    pub const fn arity(self) -> usize {
        if self.is_unary() { 1 } else { 2 }
    }

    /// Returns `true` for operators taking exactly one operand.
    ///
    /// Unary nodes are never flattened into a parent or collapsed into a
    /// bare recipient, and always serialise with an explicit keyword.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Returns `true` when an `incoming` expression merges into a node of
    /// this operator by splicing its operands in rather than nesting.
    #[must_use]
    pub fn flattens(self, incoming: Self) -> bool {
        self == incoming && !self.is_unary()
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AND", Some(OperatorKind::And))]
    #[case("OR", Some(OperatorKind::Or))]
    #[case("NOT", Some(OperatorKind::Not))]
    #[case("and", None)]
    #[case("Not", None)]
    #[case("U:alice", None)]
    fn matches_keywords_case_sensitively(
        #[case] token: &str,
        #[case] expected: Option<OperatorKind>,
    ) {
        assert_eq!(OperatorKind::from_keyword(token), expected);
    }

    #[rstest]
    #[case(OperatorKind::And, 2)]
    #[case(OperatorKind::Or, 2)]
    #[case(OperatorKind::Not, 1)]
    fn reports_arity(#[case] operator: OperatorKind, #[case] arity: usize) {
        assert_eq!(operator.arity(), arity);
    }

    #[test]
    fn only_binary_operators_flatten_into_themselves() {
        assert!(OperatorKind::And.flattens(OperatorKind::And));
        assert!(OperatorKind::Or.flattens(OperatorKind::Or));
        assert!(!OperatorKind::Not.flattens(OperatorKind::Not));
        assert!(!OperatorKind::And.flattens(OperatorKind::Or));
    }

    #[test]
    fn displays_keyword() {
        assert_eq!(OperatorKind::Or.to_string(), "OR");
    }
}
