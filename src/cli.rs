use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "act",
    about = "Find and remove cached files from the platform cache directory",
    version
)]
pub struct Cli {
    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete cache entries whose name contains any of the given tokens
    Clean {
        /// Name fragments to match against cache entries
        tokens: Vec<String>,

        /// Delete every entry in the cache directory
        #[arg(short, long)]
        all: bool,

        /// Show what would be deleted without deleting anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Maximum number of concurrent deletions (default: one per entry)
        #[arg(short, long, env = "ACT_JOBS")]
        jobs: Option<NonZeroUsize>,

        /// Skip entries not yet started after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Exit with status 1 if any entry could not be deleted
        #[arg(long)]
        fail_on_error: bool,
    },

    /// List cache entries and their sizes
    List {
        /// Report the total size of directory contents instead of the entry itself
        #[arg(long)]
        deep: bool,

        /// Print sizes as KB/MB/GB instead of bytes
        #[arg(long)]
        human: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_clean_with_short_all() {
        let cli = Cli::try_parse_from(["act", "clean", "-a"]).unwrap();
        match cli.command {
            Command::Clean { all, tokens, .. } => {
                assert!(all);
                assert!(tokens.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_tokens_and_jobs() {
        let cli = Cli::try_parse_from(["act", "clean", "foo", "bar", "--jobs", "3"]).unwrap();
        match cli.command {
            Command::Clean { tokens, jobs, all, .. } => {
                assert_eq!(tokens, ["foo", "bar"]);
                assert_eq!(jobs, NonZeroUsize::new(3));
                assert!(!all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(Cli::try_parse_from(["act", "clean", "--jobs", "0"]).is_err());
    }

    #[test]
    fn list_takes_no_positionals() {
        assert!(Cli::try_parse_from(["act", "list", "extra"]).is_err());
    }
}
