//! piplock: pin and install the requirements declared in `setup.cfg`.
//!
//! `lock` installs the declared packages into a throwaway venv and writes
//! the resulting `pip freeze` to `requirements.txt`. `install` installs them
//! into the current environment.

use std::env;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use piplock::core::requirements::Targets;
use piplock::install::run_install;
use piplock::io::process::SystemRunner;
use piplock::io::settings::ToolSettings;
use piplock::lock::run_lock;
use piplock::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "piplock",
    version,
    about = "Lock and install Python requirements declared in setup.cfg"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install the declared requirements into the current environment.
    Install(TargetArgs),
    /// Regenerate requirements.txt from a fresh virtual environment.
    Lock(TargetArgs),
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
struct TargetArgs {
    /// Include [piplock:dev] requirements.
    #[arg(long)]
    dev: bool,
    /// Include [piplock:prod] requirements.
    #[arg(long)]
    prod: bool,
}

impl From<TargetArgs> for Targets {
    fn from(args: TargetArgs) -> Self {
        Targets {
            dev: args.dev,
            prod: args.prod,
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = ToolSettings::from_env()?;
    let start = env::current_dir().context("read current directory")?;
    match cli.command {
        Command::Install(args) => {
            let report = run_install(&SystemRunner, &settings, &start, args.into())?;
            if report.packages.is_empty() {
                println!("no packages declared in setup.cfg, pip was not run");
            } else {
                println!("installed {} packages", report.packages.len());
            }
        }
        Command::Lock(args) => {
            let report = run_lock(&SystemRunner, &settings, &start, args.into())?;
            println!(
                "locked {} packages to {}",
                report.pinned,
                report.path.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lock_defaults() {
        let cli = Cli::parse_from(["piplock", "lock"]);
        assert!(matches!(
            cli.command,
            Command::Lock(TargetArgs {
                dev: false,
                prod: false
            })
        ));
    }

    #[test]
    fn parse_install_with_flags() {
        let cli = Cli::parse_from(["piplock", "install", "--dev", "--prod"]);
        assert!(matches!(
            cli.command,
            Command::Install(TargetArgs {
                dev: true,
                prod: true
            })
        ));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["piplock", "lock", "--test"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["piplock"]).is_err());
    }

    #[test]
    fn target_args_convert_to_targets() {
        let targets: Targets = TargetArgs {
            dev: true,
            prod: false,
        }
        .into();
        assert_eq!(
            targets,
            Targets {
                dev: true,
                prod: false
            }
        );
    }
}
