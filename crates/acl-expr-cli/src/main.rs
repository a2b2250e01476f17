//! `acl-expr` binary: check, canonicalise and inspect ACL expressions.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use eyre::{Context, Result};

use acl_expr_cli::commands::{Cli, run};
use acl_expr_cli::config::CliConfig;
use acl_expr_cli::logging::init_logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config(CliConfig::from_env()?);
    init_logging(&config);
    tracing::debug!(?config, "configuration loaded");

    let mut stdout = io::stdout().lock();
    let outcome = run(&cli.command, &config, &mut io::stdin().lock(), &mut stdout)?;
    stdout.flush().wrap_err("failed to flush output")?;
    Ok(outcome.into())
}
