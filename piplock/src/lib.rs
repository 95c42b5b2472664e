//! Lock and install Python requirements declared in `setup.cfg`.
//!
//! - **[`core`]**: Pure logic (INI parsing, requirement lists, freeze filtering).
//! - **[`io`]**: Side-effecting operations (project detection, config
//!   loading, subprocesses, writing `requirements.txt`). Subprocesses run
//!   through [`io::process::CommandRunner`] so tests can script them.
//!
//! [`install`] and [`lock`] coordinate the two to implement the CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod install;
pub mod io;
pub mod lock;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
