//! Command-line arguments for the gold price monitor.
//!
//! This module defines the CLI interface using `clap`. The alert threshold and check
//! interval are not flags; they live in the TOML config (see `config`).
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Watch the gold price and raise a desktop alert on large moves", long_about = None)]
pub struct Args {
    /// Path to a TOML config file. Defaults to `gold_monitor.toml` in the working directory
    /// when that file exists.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Send a sample notification and exit.
    #[clap(long)]
    pub test: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["gold_monitor"]);
        assert!(args.config.is_none());
        assert!(!args.test);
        assert!(!args.verbose);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["gold_monitor", "--config", "alt.toml", "--test", "-v"]);
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
        assert!(args.test);
        assert!(args.verbose);
    }

    #[test]
    fn test_threshold_is_not_a_flag() {
        assert!(Args::try_parse_from(["gold_monitor", "--threshold", "1.5"]).is_err());
    }
}
