//! Display names loaded from a JSON file.
//!
//! The file is a flat object mapping rendered recipient tokens to names,
//! for example `{ "U:alice": "Alice Liddell", "$OWNER": "Document owner" }`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Token-keyed display names; usable directly as an
/// [`acl_expr::RecipientResolver`].
pub type NameMap = HashMap<String, String>;

/// Read and decode a names file.
///
/// # Errors
///
/// Returns [`CliError::NamesFile`] when the file cannot be read and
/// [`CliError::NamesFormat`] when it is not a JSON object of strings.
pub fn load_names(path: &Path) -> Result<NameMap, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::NamesFile {
        path: path.to_path_buf(),
        source,
    })?;
    let names: NameMap = serde_json::from_str(&text).map_err(|source| CliError::NamesFormat {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), count = names.len(), "loaded display names");
    Ok(names)
}
