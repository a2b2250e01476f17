//! Fold classified postfix tokens into a single expression tree.

use crate::errors::AclError;
use crate::expression::{Expression, merge};
use crate::operator::OperatorKind;
use crate::recipient::Recipient;

use super::ParseOptions;
use super::lexer::ParsedToken;

/// An entry on the operand stack.
#[derive(Debug)]
enum Operand {
    /// A recipient not yet joined by any operator.
    Recipient(Recipient),
    /// A combined expression with its nesting depth (a flat node is 1).
    Expression { expr: Expression, depth: usize },
}

/// Apply one popped operand to the accumulator, tracking the exact depth.
fn apply(acc: (Expression, usize), operand: Operand) -> (Expression, usize) {
    let (base, depth) = acc;
    match operand {
        Operand::Recipient(recipient) => (base.absorb(recipient), depth),
        Operand::Expression {
            expr,
            depth: incoming,
        } => {
            let depth = if base.operator().flattens(expr.operator()) {
                depth.max(incoming)
            } else {
                depth.max(incoming + 1)
            };
            (merge(base, expr), depth)
        }
    }
}

/// Build the final tree from postfix tokens with an explicit operand stack.
///
/// Each operator pops its arity's worth of operands and folds them, oldest
/// first, into a fresh node of its own kind; the result is pushed back. A
/// single recipient token becomes a one-recipient `OR` expression.
pub(crate) fn build_expression(
    tokens: Vec<ParsedToken>,
    options: &ParseOptions,
) -> Result<Expression, AclError> {
    let mut pending: Vec<Operand> = Vec::with_capacity(tokens.len());

    for (position, token) in tokens.into_iter().enumerate() {
        let operator = match token {
            ParsedToken::Recipient(recipient) => {
                pending.push(Operand::Recipient(recipient));
                continue;
            }
            ParsedToken::Operator(operator) => operator,
        };

        let required = operator.arity();
        let available = pending.len();
        if available < required {
            return Err(AclError::OperandUnderflow {
                operator,
                position,
                required,
                available,
            });
        }

        let operands = pending.split_off(available - required);
        let (expr, depth) = operands
            .into_iter()
            .fold((Expression::new(operator), 1), apply);
        if depth > options.max_depth() {
            return Err(AclError::DepthLimitExceeded {
                max_depth: options.max_depth(),
            });
        }
        pending.push(Operand::Expression { expr, depth });
    }

    if pending.len() > 1 {
        return Err(AclError::UnconsumedOperands {
            remaining: pending.len(),
        });
    }
    match pending.pop() {
        None => Err(AclError::EmptyExpression),
        Some(Operand::Recipient(recipient)) => {
            Ok(Expression::from_recipient(OperatorKind::Or, recipient))
        }
        Some(Operand::Expression { expr, .. }) => Ok(expr),
    }
}
