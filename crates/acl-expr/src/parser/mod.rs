//! Postfix expression parsing.

mod builder;
mod lexer;

use crate::errors::AclError;
use crate::expression::{Expression, normalize, serialize};

use builder::build_expression;
use lexer::lex_expression;

/// Default ceiling on expression nesting.
///
/// High enough for any realistic ACL, including alternating `AND`/`OR`
/// chains thousands of tokens long. Callers that want a tighter bound opt
/// in with [`ParseOptions::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Limits applied while building an expression tree.
///
/// # Examples
///
/// ```
/// use acl_expr::{AclError, ParseOptions, parse_with};
///
/// let options = ParseOptions::default().with_max_depth(1);
/// assert!(parse_with("U:a U:b AND U:c AND", &options).is_ok());
/// assert_eq!(
///     parse_with("U:a U:b AND U:c OR", &options),
///     Err(AclError::DepthLimitExceeded { max_depth: 1 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Set the deepest nesting a parsed tree may reach. A node without
    /// children has depth 1.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured nesting ceiling.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Parse a postfix ACL expression with default options.
///
/// # Errors
/// See [`parse_with`].
///
/// # Examples
///
/// ```
/// use acl_expr::{OperatorKind, parse};
///
/// let expr = parse("U:alice").unwrap();
/// assert_eq!(expr.operator(), OperatorKind::Or);
/// assert_eq!(expr.recipients()[0].raw_value(), "alice");
/// ```
pub fn parse(input: &str) -> Result<Expression, AclError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a postfix ACL expression.
///
/// # Errors
/// - [`AclError::InvalidRecipientToken`] listing every token that is neither
///   an operator keyword nor a valid recipient.
/// - [`AclError::EmptyExpression`] when the input has no tokens.
/// - [`AclError::OperandUnderflow`] when an operator lacks operands.
/// - [`AclError::UnconsumedOperands`] when operands are left uncombined.
/// - [`AclError::DepthLimitExceeded`] when nesting passes
///   [`ParseOptions::max_depth`].
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Expression, AclError> {
    let tokens = lex_expression(input)?;
    let token_count = tokens.len();
    let expr = build_expression(tokens, options)?;
    log::debug!(
        "parsed {token_count} ACL token(s) into {} node with {} operand(s)",
        expr.operator(),
        expr.operand_count()
    );
    Ok(expr)
}

/// Parse, normalise and serialise `input` in one step.
///
/// # Errors
/// Returns the [`AclError`] produced by [`parse`].
///
/// # Examples
///
/// ```
/// use acl_expr::canonicalize;
///
/// assert_eq!(canonicalize("  U:a   U:b AND ").unwrap(), "U:a U:b AND");
/// ```
pub fn canonicalize(input: &str) -> Result<String, AclError> {
    parse(input).map(|expr| serialize(&normalize(&expr)))
}
