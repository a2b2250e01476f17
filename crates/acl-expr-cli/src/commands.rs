//! Command dispatch for the `acl-expr` entrypoint.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use acl_expr::{Expression, normalize, parse_with};
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};

use crate::config::{CliConfig, LogLevel, parse_max_depth};
use crate::names::load_names;
use crate::output::{
    write_canonical, write_check_failure, write_check_ok, write_tree, write_tree_json,
};

/// Check, canonicalise and inspect postfix ACL expressions.
#[derive(Debug, Parser)]
#[command(name = "acl-expr", author, version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Deepest expression nesting accepted by the parser.
    #[arg(long, global = true, value_parser = parse_max_depth)]
    pub max_depth: Option<usize>,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Layer the command-line flags over `base`.
    #[must_use]
    pub fn config(&self, base: CliConfig) -> CliConfig {
        base.apply_overrides(self.log_level, self.max_depth)
    }
}

/// Supported operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate an expression, listing every invalid token.
    Check(ExpressionArg),
    /// Print the canonical normalised form of an expression.
    Canonical(ExpressionArg),
    /// Print the normalised expression tree.
    Tree(TreeArgs),
}

/// Expression text given on the command line, or read from stdin when
/// absent.
#[derive(Debug, Args)]
pub struct ExpressionArg {
    /// Tokens of the expression; several arguments are joined with spaces.
    pub(crate) expression: Vec<String>,
}

/// Options for the `tree` subcommand.
#[derive(Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub(crate) input: ExpressionArg,
    /// JSON object mapping recipient tokens to display names.
    #[arg(long, value_name = "FILE")]
    pub(crate) names: Option<PathBuf>,
    /// Emit JSON instead of an indented outline.
    #[arg(long)]
    pub(crate) json: bool,
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// `check` found the expression invalid.
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Rejected => Self::FAILURE,
        }
    }
}

impl ExpressionArg {
    fn read(&self, stdin: &mut dyn Read) -> Result<String> {
        if !self.expression.is_empty() {
            return Ok(self.expression.join(" "));
        }
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .wrap_err("failed to read expression from stdin")?;
        Ok(text)
    }
}

/// Execute `command`, reading input from `stdin` when no expression was
/// given and writing results to `stdout`.
///
/// A failed `check` is reported on `stdout` as [`Outcome::Rejected`]; every
/// other parse failure is returned as an error.
///
/// # Errors
///
/// Returns an error when input cannot be read, output cannot be written,
/// a names file is unusable, or the expression does not parse.
pub fn run(
    command: &Command,
    config: &CliConfig,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        Command::Check(input) => handle_check(&input.read(stdin)?, config, stdout),
        Command::Canonical(input) => {
            let expr = parse_normalised(&input.read(stdin)?, config)?;
            write_canonical(stdout, &expr)?;
            Ok(Outcome::Success)
        }
        Command::Tree(args) => handle_tree(args, config, stdin, stdout),
    }
}

fn parse_normalised(text: &str, config: &CliConfig) -> Result<Expression> {
    let expr = parse_with(text, &config.parse_options())
        .wrap_err_with(|| format!("failed to parse ACL expression '{}'", text.trim()))?;
    Ok(normalize(&expr))
}

fn handle_check(text: &str, config: &CliConfig, stdout: &mut dyn Write) -> Result<Outcome> {
    match parse_with(text, &config.parse_options()) {
        Ok(_) => {
            write_check_ok(stdout)?;
            Ok(Outcome::Success)
        }
        Err(error) => {
            tracing::info!(%error, "expression rejected");
            write_check_failure(stdout, &error)?;
            Ok(Outcome::Rejected)
        }
    }
}

fn handle_tree(
    args: &TreeArgs,
    config: &CliConfig,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<Outcome> {
    let mut expr = parse_normalised(&args.input.read(stdin)?, config)?;
    if let Some(path) = &args.names {
        let names = load_names(path)?;
        expr = expr.resolve_display_names(&names);
    }
    if args.json {
        write_tree_json(stdout, &expr)?;
    } else {
        write_tree(stdout, &expr)?;
    }
    Ok(Outcome::Success)
}
