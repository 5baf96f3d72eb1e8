// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use clap's "derive" API: the CLI structure is described by Rust structs
// and enums, and clap generates the parsing, --help and --version for us.
//
// Commands:
// - check: probe every site once and print / export the report
// - validate: check a target list for mistakes without probing anything
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use site_prober::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "site-prober",
    version,
    about = "Probe a list of websites concurrently and report which are online, degraded or offline",
    long_about = "site-prober sends one HTTP GET to every site in a list, a few at a time, and \
                  classifies each as Online (2xx/3xx), Warning (4xx/5xx) or Offline (no response). \
                  Exit code: 0 = all online, 1 = some sites unhealthy, 2 = error, 3 = run interrupted."
)]
pub struct Cli {
    /// Increase log verbosity (-v = info, -vv = debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe every site once and print the report
    ///
    /// Example: site-prober check https://example.com https://example.org --json
    Check {
        #[command(flatten)]
        targets: TargetArgs,

        /// Per-site timeout in seconds (5-30)
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// How many sites to probe at the same time (1-10)
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file (or into this directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Accept invalid TLS certificates
        #[arg(long)]
        insecure: bool,

        /// Send probes through this proxy (e.g. http://proxy:3128)
        #[arg(long)]
        proxy: Option<String>,

        /// Override the User-Agent header
        #[arg(long)]
        user_agent: Option<String>,

        /// Fail instead of printing an empty report when there are no targets
        #[arg(long)]
        require_targets: bool,
    },

    /// Validate a target list without probing it
    ///
    /// Example: site-prober validate --targets-file websites.json
    Validate {
        #[command(flatten)]
        targets: TargetArgs,
    },
}

/// Where the target list comes from.
#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// URLs to probe (http:// or https://)
    pub urls: Vec<String>,

    /// JSON file with an array of URLs. Defaults to ./websites.json when no URLs are given.
    #[arg(long, short = 'f')]
    pub targets_file: Option<PathBuf>,

    /// Treat entries without a scheme as https:// URLs
    #[arg(long)]
    pub assume_https: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::parse_from(["site-prober", "check", "https://a.test"]);
        match cli.command {
            Commands::Check {
                targets,
                timeout,
                concurrency,
                json,
                ..
            } => {
                assert_eq!(targets.urls, vec!["https://a.test"]);
                assert_eq!(timeout, DEFAULT_TIMEOUT_SECS);
                assert_eq!(concurrency, DEFAULT_CONCURRENCY);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_counted() {
        let cli = Cli::parse_from(["site-prober", "-vv", "validate", "https://a.test"]);
        assert_eq!(cli.verbose, 2);
    }
}
