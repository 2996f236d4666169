//! Public exclusion list: one address per line, `#` comments.

use std::collections::BTreeSet;
use std::path::Path;

use lottery_primitives::is_valid_address;
use tracing::{info, warn};

use crate::errors::CliError;

#[must_use]
pub fn parse_exclusions(text: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for (lineno, line) in text.lines().enumerate() {
        let w = line.trim();
        if w.is_empty() || w.starts_with('#') {
            continue;
        }
        if !is_valid_address(w) {
            // invalid entries stay excluded
            warn!(line = lineno + 1, address = w, "exclusion entry is not a valid address");
        }
        out.insert(w.to_owned());
    }
    out
}

/// No path means no exclusions. A path that cannot be read is an error.
pub fn load_exclusions(path: Option<&Path>) -> Result<BTreeSet<String>, CliError> {
    let Some(path) = path else {
        return Ok(BTreeSet::new());
    };
    let text = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    let excluded = parse_exclusions(&text);
    info!(path = %path.display(), count = excluded.len(), "loaded exclusion list");
    Ok(excluded)
}
