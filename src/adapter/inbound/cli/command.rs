//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trading signal relay: matches signals to subscribers and collects preferences
#[derive(Parser, Debug)]
#[command(name = "signal-relay")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Serve the match API and run the preference bot (default)
    #[default]
    Run,

    /// Validate configuration and print a summary without starting anything
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["signal-relay"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::Run);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_check_with_config() {
        let cli =
            Cli::try_parse_from(["signal-relay", "check", "--config", "relay.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
    }

    #[test]
    fn global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["signal-relay", "--json", "-c", "a.toml", "run"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command, Some(Commands::Run));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["signal-relay", "deploy"]).is_err());
    }
}
