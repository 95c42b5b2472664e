//! Tool settings read from the environment.

use std::ffi::OsString;

use anyhow::Result;

use crate::error::PiplockError;

pub const PYTHON_VAR: &str = "PIPLOCK_PYTHON";
pub const PIP_VAR: &str = "PIPLOCK_PIP";

/// Commands piplock shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Interpreter used for `-m venv` when locking.
    pub python: String,
    /// Installer used by `piplock install` against the current environment.
    pub pip: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            pip: "pip".to_string(),
        }
    }
}

impl ToolSettings {
    /// Read overrides from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build settings from an arbitrary variable lookup. Unset variables keep
    /// their defaults; set but non-UTF-8 values are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(python) = lookup(PYTHON_VAR) {
            settings.python = utf8_setting(PYTHON_VAR, python)?;
        }
        if let Some(pip) = lookup(PIP_VAR) {
            settings.pip = utf8_setting(PIP_VAR, pip)?;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.python.trim().is_empty() {
            return Err(invalid(PYTHON_VAR).into());
        }
        if self.pip.trim().is_empty() {
            return Err(invalid(PIP_VAR).into());
        }
        Ok(())
    }
}

fn utf8_setting(name: &str, value: OsString) -> Result<String, PiplockError> {
    value
        .into_string()
        .map_err(|value| PiplockError::InvalidSetting {
            name: name.to_string(),
            reason: format!("{value:?} is not valid UTF-8"),
        })
}

fn invalid(name: &str) -> PiplockError {
    PiplockError::InvalidSetting {
        name: name.to_string(),
        reason: "must not be empty".to_string(),
    }
}
