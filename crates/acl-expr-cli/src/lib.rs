//! Command-line front end for the `acl-expr` library.
//!
//! The `acl-expr` binary validates postfix ACL expressions, prints their
//! canonical form and renders the normalised tree as an outline or as JSON.
//!
//! # Configuration
//!
//! - `ACL_EXPR_LOG_LEVEL`: log verbosity on stderr (trace, debug, info, warn,
//!   error)
//! - `ACL_EXPR_MAX_DEPTH`: deepest expression nesting accepted
//!
//! The `--log-level` and `--max-depth` flags override both.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod names;
mod output;
