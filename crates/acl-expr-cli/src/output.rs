//! Helpers for rendering command output.

use std::io::Write;

use acl_expr::{AclError, Expression, Recipient};
use eyre::{Context, Result};

const INDENT: &str = "  ";

pub(crate) fn write_check_ok(writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "ok").wrap_err("failed to write check result")
}

/// One line per rejected token, or the error itself when the failure is
/// structural.
pub(crate) fn write_check_failure(writer: &mut dyn Write, error: &AclError) -> Result<()> {
    let AclError::InvalidRecipientToken(infos) = error else {
        return writeln!(writer, "{error}").wrap_err("failed to write check failure");
    };
    for info in infos {
        writeln!(
            writer,
            "{}: {} (token {})",
            info.token, info.reason, info.position
        )
        .wrap_err_with(|| format!("failed to report invalid token {}", info.token))?;
    }
    Ok(())
}

pub(crate) fn write_canonical(writer: &mut dyn Write, expr: &Expression) -> Result<()> {
    writeln!(writer, "{expr}").wrap_err("failed to write canonical expression")
}

/// Render the tree one node per line, indented by depth. Each operator is
/// followed by its recipients and then its child operators.
pub(crate) fn write_tree(writer: &mut dyn Write, expr: &Expression) -> Result<()> {
    for (depth, node) in expr.walk() {
        let pad = INDENT.repeat(depth);
        writeln!(writer, "{pad}{}", node.operator())
            .wrap_err_with(|| format!("failed to write {} node", node.operator()))?;
        for recipient in node.recipients() {
            write_recipient(writer, &pad, recipient)?;
        }
    }
    Ok(())
}

fn write_recipient(writer: &mut dyn Write, pad: &str, recipient: &Recipient) -> Result<()> {
    let written = if recipient.has_resolved_name() {
        writeln!(
            writer,
            "{pad}{INDENT}{recipient} ({})",
            recipient.display_name()
        )
    } else {
        writeln!(writer, "{pad}{INDENT}{recipient}")
    };
    written.wrap_err_with(|| format!("failed to write recipient {recipient}"))
}

pub(crate) fn write_tree_json(writer: &mut dyn Write, expr: &Expression) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, expr)
        .wrap_err("failed to serialize expression tree to JSON")?;
    writeln!(writer).wrap_err("failed to terminate JSON output with newline")
}
