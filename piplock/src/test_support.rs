//! Test-only helpers: a scripted command runner and project fixtures.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};

use crate::io::config::CONFIG_FILE;
use crate::io::process::{CommandOutput, CommandRunner, Invocation};

/// Command runner that replays queued outputs and records every invocation.
///
/// When the queue is empty it either falls back to a successful, silent exit
/// (see [`ScriptedRunner::succeeding`]) or returns an error, so tests notice
/// unexpected extra commands.
pub struct ScriptedRunner {
    outputs: RefCell<VecDeque<CommandOutput>>,
    invocations: RefCell<Vec<Invocation>>,
    succeed_when_empty: bool,
}

impl ScriptedRunner {
    pub fn new(outputs: Vec<CommandOutput>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into()),
            invocations: RefCell::new(Vec::new()),
            succeed_when_empty: false,
        }
    }

    /// Runner where every command exits 0 with no output.
    pub fn succeeding() -> Self {
        Self {
            succeed_when_empty: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.invocations.borrow_mut().push(invocation.clone());
        match self.outputs.borrow_mut().pop_front() {
            Some(output) => Ok(output),
            None if self.succeed_when_empty => Ok(ok_output("")),
            None => Err(anyhow!("unexpected command `{invocation}`")),
        }
    }
}

/// Successful exit with the given stdout.
pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
    }
}

/// Failed exit with the given code and no stdout.
pub fn failed_output(code: i32) -> CommandOutput {
    CommandOutput {
        code: Some(code),
        stdout: Vec::new(),
    }
}

/// Write a `setup.cfg` declaring all three piplock sections.
pub fn write_setup_cfg(root: &Path, common: &[&str], dev: &[&str], prod: &[&str]) -> Result<()> {
    let mut buf = String::from("[metadata]\nname = fixture\n");
    for (section, reqs) in [
        ("piplock:common", common),
        ("piplock:dev", dev),
        ("piplock:prod", prod),
    ] {
        buf.push_str(&format!("\n[{section}]\nreqs =\n"));
        for req in reqs {
            buf.push_str(&format!("    {req}\n"));
        }
    }
    fs::write(root.join(CONFIG_FILE), buf)?;
    Ok(())
}
