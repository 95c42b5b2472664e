//! I/O helpers for piplock commands.

pub mod config;
pub mod lockfile;
pub mod process;
pub mod project;
pub mod python;
pub mod settings;
