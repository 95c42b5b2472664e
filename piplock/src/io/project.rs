//! Project root detection.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, instrument};

use crate::error::PiplockError;

/// Files whose presence marks a directory as the project root.
pub const MARKER_FILES: [&str; 2] = ["setup.cfg", "requirements.txt"];

/// Walk from `start` towards the filesystem root and return the first
/// directory that directly contains a marker file.
#[instrument(skip_all, fields(start = %start.display()))]
pub fn locate_root_from(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if let Some(marker) = MARKER_FILES.iter().find(|name| dir.join(name).exists()) {
            debug!(root = %dir.display(), marker, "found project root");
            return Ok(dir.to_path_buf());
        }
    }
    Err(PiplockError::ProjectNotFound {
        start: start.to_path_buf(),
    }
    .into())
}
