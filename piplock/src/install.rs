//! `piplock install`: install declared requirements into the current environment.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::requirements::Targets;
use crate::io::config::read_config;
use crate::io::process::CommandRunner;
use crate::io::project::locate_root_from;
use crate::io::python::{Environment, PythonTools};
use crate::io::settings::ToolSettings;

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Requirement specifiers passed to pip, in order.
    pub packages: Vec<String>,
}

/// Resolve the project from `start`, then `pip install` the target set.
///
/// pip rejects an install with no requirements, so an empty target set
/// runs nothing and reports no packages.
#[instrument(skip_all, fields(start = %start.display(), dev = targets.dev, prod = targets.prod))]
pub fn run_install<R: CommandRunner>(
    runner: &R,
    settings: &ToolSettings,
    start: &Path,
    targets: Targets,
) -> Result<InstallReport> {
    let root = locate_root_from(start)?;
    let config = read_config(&root).context("read configuration")?;
    let packages = config.target_packages(targets.dev, targets.prod);

    if packages.is_empty() {
        info!("no packages declared, pip not run");
        return Ok(InstallReport { packages });
    }

    PythonTools::new(runner, settings).install(&Environment::Current, &packages)?;
    Ok(InstallReport { packages })
}
