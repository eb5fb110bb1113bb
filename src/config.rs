use anyhow::{Context, Result};
use std::path::Path;

use crate::PatchOptions;

/// Read patch options from a JSON file such as `{ "looseIncludes": true }`.
pub fn load_options(path: &Path) -> Result<PatchOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    PatchOptions::from_json(&text)
        .with_context(|| format!("failed to parse options file {}", path.display()))
}
