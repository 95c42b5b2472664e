//! Process exit codes for piplock commands.

use crate::error::{PiplockError, find_piplock_error};

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed for any reason other than a failing package-manager process.
pub const FAILURE: i32 = 1;

/// Exit code for a failed command.
///
/// A subprocess that exited non-zero lends its own code; everything else
/// (including a subprocess killed by a signal) maps to [`FAILURE`].
pub fn for_error(err: &anyhow::Error) -> i32 {
    match find_piplock_error(err) {
        Some(PiplockError::Subprocess {
            code: Some(code), ..
        }) if *code != OK => *code,
        _ => FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn subprocess_error(code: Option<i32>) -> anyhow::Error {
        Err::<(), _>(PiplockError::Subprocess {
            command: "pip install x".to_string(),
            code,
        })
        .context("install packages")
        .unwrap_err()
    }

    #[test]
    fn subprocess_code_propagates() {
        assert_eq!(for_error(&subprocess_error(Some(2))), 2);
    }

    #[test]
    fn signal_termination_is_failure() {
        assert_eq!(for_error(&subprocess_error(None)), FAILURE);
    }

    #[test]
    fn other_errors_are_failure() {
        let err = anyhow::Error::new(PiplockError::MissingSection {
            section: "piplock:prod".to_string(),
        });
        assert_eq!(for_error(&err), FAILURE);
        assert_eq!(for_error(&anyhow::anyhow!("boom")), FAILURE);
    }
}
