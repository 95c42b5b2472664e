//! Synchronous child process execution.
//!
//! Every external tool piplock drives (venv creation, `pip install`,
//! `pip freeze`) goes through [`CommandRunner`]. Tests substitute a scripted
//! runner so no real package manager is needed.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Command, Stdio};

use anyhow::Result;
use tracing::{debug, error, instrument};

use crate::error::PiplockError;

/// Which child streams are captured instead of passed through to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Inherit stdout and stderr so the operator sees the tool's progress.
    None,
    /// Collect stdout in memory; stderr still goes to the terminal.
    Stdout,
}

/// A program plus arguments to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub capture: Capture,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            capture: Capture::None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    pub fn capture(mut self, capture: Capture) -> Self {
        self.capture = capture;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit code and captured stdout of a finished child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    /// Empty unless the invocation captured stdout.
    pub stdout: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Turn a non-zero exit into [`PiplockError::Subprocess`].
    pub fn ensure_success(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(PiplockError::Subprocess {
            command: invocation.to_string(),
            code: self.code,
        }
        .into())
    }
}

/// Abstraction over blocking process execution.
pub trait CommandRunner {
    /// Run `invocation` to completion. A launch failure is an error; a
    /// non-zero exit is reported through [`CommandOutput::code`].
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Runner that spawns real processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %invocation, capture = ?invocation.capture))]
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());
        match invocation.capture {
            Capture::None => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            Capture::Stdout => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::inherit());
            }
        }

        debug!("spawning child process");
        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(PiplockError::Spawn {
                    command: invocation.to_string(),
                    source: e,
                }
                .into());
            }
        };

        debug!(
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            "command finished"
        );
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
        })
    }
}
