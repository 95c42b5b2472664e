//! `piplock lock`: pin the resolved dependency closure into `requirements.txt`.
//!
//! The target set is installed into a throwaway venv inside a temporary
//! directory, `pip freeze` output is captured in memory, packaging
//! infrastructure is filtered out and the result replaces
//! `requirements.txt` at the project root.
//!
//! `requirements.txt` is only touched after venv creation, install and freeze
//! have all succeeded. The temporary directory is removed on every path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::core::requirements::{Targets, remove_packaging_libs};
use crate::io::config::read_config;
use crate::io::lockfile::{REQUIREMENTS_FILE, write_requirements};
use crate::io::process::CommandRunner;
use crate::io::project::locate_root_from;
use crate::io::python::{Environment, PythonTools};
use crate::io::settings::ToolSettings;

const SCRATCH_PREFIX: &str = "piplock-";
const VENV_DIR: &str = "venv";

/// Outcome of a successful lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    /// The `requirements.txt` that was written.
    pub path: PathBuf,
    /// Number of pinned lines written.
    pub pinned: usize,
}

#[instrument(skip_all, fields(start = %start.display(), dev = targets.dev, prod = targets.prod))]
pub fn run_lock<R: CommandRunner>(
    runner: &R,
    settings: &ToolSettings,
    start: &Path,
    targets: Targets,
) -> Result<LockReport> {
    let config_root = locate_root_from(start)?;
    let config = read_config(&config_root).context("read configuration")?;
    let packages = config.target_packages(targets.dev, targets.prod);

    let tools = PythonTools::new(runner, settings);
    let frozen = freeze_in_scratch_venv(&tools, &packages)?;
    let requirements = remove_packaging_libs(&frozen);

    // Located independently of `config_root`.
    let output_root = locate_root_from(start)?;
    if output_root != config_root {
        warn!(
            config_root = %config_root.display(),
            output_root = %output_root.display(),
            "project root changed while locking"
        );
    }

    let path = output_root.join(REQUIREMENTS_FILE);
    write_requirements(&path, &requirements)
        .with_context(|| format!("write {}", path.display()))?;
    let pinned = requirements.lines().count();
    info!(path = %path.display(), pinned, "wrote requirements");
    Ok(LockReport { path, pinned })
}

/// Install `packages` into a fresh venv and return its `pip freeze` output.
fn freeze_in_scratch_venv<R: CommandRunner>(
    tools: &PythonTools<'_, R>,
    packages: &[String],
) -> Result<String> {
    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir()
        .context("create temporary directory")?;
    let venv = scratch.path().join(VENV_DIR);

    // Must not `?` before `close`: removal failures are only visible there.
    let frozen = install_and_freeze(tools, &venv, packages);
    if let Err(err) = scratch.close() {
        warn!(err = %err, "failed to remove temporary directory");
    }
    frozen
}

fn install_and_freeze<R: CommandRunner>(
    tools: &PythonTools<'_, R>,
    venv: &Path,
    packages: &[String],
) -> Result<String> {
    tools.create_venv(venv)?;
    let env = Environment::Venv(venv.to_path_buf());
    if packages.is_empty() {
        warn!("no packages declared, locking an empty environment");
    } else {
        tools.install(&env, packages)?;
    }
    tools.freeze(&env)
}
