//! Writes the pinned `requirements.txt`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Replace `path` with `contents` (temp file + rename), so readers never see
/// a partially written file.
pub fn write_requirements(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("requirements path missing parent {}", path.display()))?;
    let tmp_path = parent.join(format!(".{REQUIREMENTS_FILE}.tmp"));
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp requirements {}", tmp_path.display()))?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), err = %cleanup, "failed to remove temp requirements");
        }
        return Err(err).with_context(|| format!("replace requirements {}", path.display()));
    }
    Ok(())
}
