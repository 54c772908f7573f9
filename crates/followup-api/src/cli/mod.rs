//! CLI command definitions for the `followup` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Chat-history-backed proxy in front of a hosted LLM endpoint.
#[derive(Parser)]
#[command(name = "followup", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    pub log_format: LogFormatArg,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml and sessions.db.
    #[arg(long, env = "FOLLOWUP_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl Cli {
    /// Default tracing filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,followup=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["followup", "serve", "--port", "9000", "--host", "0.0.0.0", "-v"]);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(9000));
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
            }
            Commands::Config => panic!("expected serve"),
        }
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_log_filter_levels() {
        let quiet = Cli::parse_from(["followup", "--quiet", "config"]);
        assert_eq!(quiet.log_filter(), "error");
        let loud = Cli::parse_from(["followup", "-vv", "config"]);
        assert_eq!(loud.log_filter(), "trace");
    }
}
