//! Split raw expression text into classified tokens.

use crate::errors::{AclError, InvalidTokenInfo};
use crate::operator::OperatorKind;
use crate::recipient::{Recipient, classify};

/// One classified input token.
///
/// A recipient token has not been combined with anything yet; only an
/// operator token can join operands into an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedToken {
    Operator(OperatorKind),
    Recipient(Recipient),
}

/// Classify every whitespace-separated token of `input`.
///
/// Every rejected token is collected before failing, so the error lists all
/// of them rather than only the first.
pub(crate) fn lex_expression(input: &str) -> Result<Vec<ParsedToken>, AclError> {
    let mut tokens = Vec::new();
    let mut invalid = Vec::new();

    for (position, raw) in input.split_ascii_whitespace().enumerate() {
        if let Some(operator) = OperatorKind::from_keyword(raw) {
            tokens.push(ParsedToken::Operator(operator));
            continue;
        }
        match classify(raw) {
            Ok(recipient) => {
                log::trace!("token {position} `{raw}` is a {:?} recipient", recipient.kind());
                tokens.push(ParsedToken::Recipient(recipient));
            }
            Err(reason) => invalid.push(InvalidTokenInfo::new(reason, position, raw)),
        }
    }

    if !invalid.is_empty() {
        log::warn!("rejected {} invalid ACL token(s)", invalid.len());
        return Err(AclError::InvalidRecipientToken(invalid));
    }
    if tokens.is_empty() {
        return Err(AclError::EmptyExpression);
    }
    Ok(tokens)
}
