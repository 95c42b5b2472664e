//! venv and pip invocations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::io::process::{Capture, CommandRunner, Invocation};
use crate::io::settings::ToolSettings;

/// Environment a pip command acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Whatever environment the configured `pip` belongs to.
    Current,
    /// A virtual environment rooted at the given directory.
    Venv(PathBuf),
}

impl Environment {
    fn pip_program(&self, settings: &ToolSettings) -> PathBuf {
        match self {
            Environment::Current => PathBuf::from(&settings.pip),
            Environment::Venv(root) => venv_pip(root),
        }
    }
}

/// Path of the pip executable inside a venv created by `python -m venv`.
pub fn venv_pip(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("pip.exe")
    } else {
        venv.join("bin").join("pip")
    }
}

/// Builds and runs the Python tooling commands through a [`CommandRunner`].
pub struct PythonTools<'a, R: CommandRunner> {
    runner: &'a R,
    settings: &'a ToolSettings,
}

impl<'a, R: CommandRunner> PythonTools<'a, R> {
    pub fn new(runner: &'a R, settings: &'a ToolSettings) -> Self {
        Self { runner, settings }
    }

    /// `<python> -m venv <path>`
    #[instrument(skip_all, fields(venv = %path.display()))]
    pub fn create_venv(&self, path: &Path) -> Result<()> {
        let invocation = Invocation::new(&self.settings.python)
            .args(["-m", "venv"])
            .arg(path);
        info!("creating virtual environment");
        self.runner
            .run(&invocation)?
            .ensure_success(&invocation)
            .context("create virtual environment")?;
        Ok(())
    }

    /// `<pip> install <packages...>`, with pip's output shown to the user.
    #[instrument(skip_all, fields(env = ?env, packages = packages.len()))]
    pub fn install(&self, env: &Environment, packages: &[String]) -> Result<()> {
        let invocation = Invocation::new(env.pip_program(self.settings))
            .arg("install")
            .args(packages);
        info!("installing packages");
        self.runner
            .run(&invocation)?
            .ensure_success(&invocation)
            .context("install packages")?;
        Ok(())
    }

    /// `<pip> freeze`, returning its captured stdout.
    #[instrument(skip_all, fields(env = ?env))]
    pub fn freeze(&self, env: &Environment) -> Result<String> {
        let invocation = Invocation::new(env.pip_program(self.settings))
            .arg("freeze")
            .capture(Capture::Stdout);
        let output = self
            .runner
            .run(&invocation)?
            .ensure_success(&invocation)
            .context("freeze installed packages")?;
        Ok(output.stdout_lossy())
    }
}
