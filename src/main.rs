use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use act::cli::{Cli, Command};
use act::cmd;
use act::cmd::clean::CleanArgs;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with per-file notices.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Clean {
            tokens,
            all,
            dry_run,
            jobs,
            timeout,
            fail_on_error,
        } => {
            let summary = cmd::clean::clean(CleanArgs {
                tokens,
                all,
                dry_run,
                jobs,
                timeout: timeout.map(Duration::from_secs),
            })?;
            Ok(ExitCode::from(cmd::clean::exit_status(&summary, fail_on_error)))
        }
        Command::List { deep, human } => {
            cmd::list::list(deep, human)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
