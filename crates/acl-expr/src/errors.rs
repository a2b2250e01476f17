//! Error types shared by the expression parsing modules.

use std::fmt;
use thiserror::Error;

use crate::operator::OperatorKind;

pub(crate) const UNKNOWN_PREFIX: &str = "unknown recipient prefix";
pub(crate) const MISSING_VALUE: &str = "missing recipient value";
pub(crate) const WHITESPACE_IN_VALUE: &str = "recipient value contains whitespace";
pub(crate) const LITERAL_MISMATCH: &str = "self-contained recipient must use its literal token";

/// Diagnostic describing a single token that is neither an operator keyword
/// nor a recognised recipient.
///
/// # Examples
/// ```
/// use acl_expr::InvalidTokenInfo;
/// let info = InvalidTokenInfo::new("unknown recipient prefix", 2, "XX:b");
/// assert_eq!(info.token, "XX:b");
/// assert_eq!(info.position, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTokenInfo {
    /// Why the token was rejected.
    pub reason: &'static str,
    /// Zero-based index of the token within the whitespace-split input.
    pub position: usize,
    /// The offending token exactly as it appeared in the input.
    pub token: String,
}

impl InvalidTokenInfo {
    /// Create a new diagnostic for a rejected token.
    #[must_use]
    pub fn new(reason: &'static str, position: usize, token: impl Into<String>) -> Self {
        Self {
            reason,
            position,
            token: token.into(),
        }
    }
}

impl fmt::Display for InvalidTokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` at token {} (zero-based)",
            self.reason, self.token, self.position
        )
    }
}

/// Error returned when a single recipient cannot be constructed or parsed.
///
/// # Examples
/// ```
/// use acl_expr::Recipient;
/// let err = "X:alice".parse::<Recipient>().unwrap_err();
/// assert_eq!(err.info().token, "X:alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RecipientError(pub(crate) InvalidTokenInfo);

impl RecipientError {
    pub(crate) fn new(reason: &'static str, token: impl Into<String>) -> Self {
        Self(InvalidTokenInfo::new(reason, 0, token))
    }

    /// Borrow the underlying token diagnostic.
    #[must_use]
    pub const fn info(&self) -> &InvalidTokenInfo {
        &self.0
    }

    /// Consume the error, returning the token diagnostic.
    #[must_use]
    pub fn into_info(self) -> InvalidTokenInfo {
        self.0
    }
}

/// Errors surfaced while turning a postfix string into an expression tree.
///
/// Token classification failures are collected across the whole input, so a
/// single [`AclError::InvalidRecipientToken`] names every offending token.
///
/// # Examples
/// ```
/// use acl_expr::{AclError, parse};
/// let err = parse("U:a XX:b YY AND").unwrap_err();
/// assert_eq!(err.invalid_tokens(), vec!["XX:b", "YY"]);
/// assert_eq!(err.to_string(), "invalid recipient tokens: `XX:b`, `YY`");
/// assert!(matches!(parse("   "), Err(AclError::EmptyExpression)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AclError {
    /// One or more tokens matched neither an operator nor a recipient prefix.
    #[error("invalid recipient tokens: {}", join_tokens(.0))]
    InvalidRecipientToken(Vec<InvalidTokenInfo>),
    /// The input held no tokens once blanks were discarded.
    #[error("ACL expression is empty")]
    EmptyExpression,
    /// An operator found fewer pending operands than its arity requires.
    #[error(
        "operator {operator} at token {position} needs {required} operand(s) but {available} available"
    )]
    OperandUnderflow {
        /// The operator that could not be applied.
        operator: OperatorKind,
        /// Zero-based token index of the operator.
        position: usize,
        /// Operands the operator consumes.
        required: usize,
        /// Operands that were pending when it was reached.
        available: usize,
    },
    /// Operands were left over with no operator to combine them.
    #[error("{remaining} operands remain without an operator to combine them")]
    UnconsumedOperands {
        /// Number of entries left on the operand stack.
        remaining: usize,
    },
    /// Nesting grew beyond the configured limit.
    #[error("expression nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded {
        /// The limit that was exceeded.
        max_depth: usize,
    },
}

impl AclError {
    /// Return the raw text of every rejected token, in input order.
    ///
    /// Errors other than [`AclError::InvalidRecipientToken`] yield an empty
    /// list.
    #[must_use]
    pub fn invalid_tokens(&self) -> Vec<&str> {
        match self {
            Self::InvalidRecipientToken(infos) => {
                infos.iter().map(|info| info.token.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_tokens(infos: &[InvalidTokenInfo]) -> String {
    infos
        .iter()
        .map(|info| format!("`{}`", info.token))
        .collect::<Vec<_>>()
        .join(", ")
}
