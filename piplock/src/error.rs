//! Typed failures surfaced by piplock commands.
//!
//! Orchestration code returns `anyhow::Result` and wraps these variants with
//! context. Callers that need to branch on the failure kind (exit codes,
//! tests) downcast back to [`PiplockError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::ini::IniError;

#[derive(Debug, Error)]
pub enum PiplockError {
    #[error(
        "could not detect project root: no setup.cfg or requirements.txt in {} or any parent",
        .start.display()
    )]
    ProjectNotFound { start: PathBuf },

    #[error("config file {} not found or unreadable", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: IniError,
    },

    #[error("missing section [{section}] in setup.cfg")]
    MissingSection { section: String },

    #[error("missing key `{key}` in section [{section}] of setup.cfg")]
    MissingKey { section: String, key: String },

    #[error("failed to launch `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "`{command}` exited with status {}",
        .code.map_or_else(|| "unknown (terminated by signal)".to_string(), |code| code.to_string())
    )]
    Subprocess { command: String, code: Option<i32> },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
}

/// Find the first [`PiplockError`] in an `anyhow` chain.
pub fn find_piplock_error(err: &anyhow::Error) -> Option<&PiplockError> {
    err.chain().find_map(|cause| cause.downcast_ref::<PiplockError>())
}
