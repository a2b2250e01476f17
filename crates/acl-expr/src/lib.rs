//! Parsing, normalisation and serialisation of postfix ACL expressions.
//!
//! An access-control list is stored as a flat, space-separated postfix
//! string such as `U:alice G:staff OR $OWNER AND`. This crate turns such a
//! string into an [`Expression`] tree, canonicalises the tree with
//! [`normalize`], and writes it back with [`serialize`]. For any valid input
//! `s`, parsing `serialize(&normalize(&parse(s)?))` reproduces the
//! normalised tree.
//!
//! Evaluating an expression against a security context is left to callers,
//! which receive the tree through read-only accessors and
//! [`Expression::walk`].

mod errors;
mod expression;
mod operator;
mod parser;
mod recipient;
mod resolve;

pub use errors::{AclError, InvalidTokenInfo, RecipientError};
pub use expression::{Expression, Walk, merge, normalize, serialize, to_tokens};
pub use operator::OperatorKind;
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, canonicalize, parse, parse_with};
pub use recipient::{Recipient, RecipientKind};
pub use resolve::RecipientResolver;
