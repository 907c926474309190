//! # CLI Argument Definitions
//!
//! Global flags layer on top of the loaded configuration; subcommands map onto
//! [`commands`](crate::commands).

use clap::{Parser, Subcommand};
use forma::domain::config::FormaConfig;
use std::path::PathBuf;

/// Value accepted in place of a path to read standard input.
pub const STDIN: &str = "-";

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "forma")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect element documents and render content templates")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML); `FORMA__*` variables still apply
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `log.level` (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Formats log lines as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies command-line overrides to the loaded configuration.
    pub fn apply_overrides(&self, config: &mut FormaConfig) {
        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }
        if self.json_logs {
            config.log.json = true;
        }
    }
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deserialize a document and print its element outline
    Inspect {
        /// Document file, or `-` for standard input
        input: String,
        /// Print the re-serialized document instead of the outline
        #[arg(long)]
        emit: bool,
        /// Pretty-print the `--emit` output
        #[arg(long, requires = "emit")]
        pretty: bool,
    },
    /// Resolve a template against records loaded from a JSON file
    Render {
        /// JSON file shaped as `{ "records": {...}, "collections": {...} }`
        #[arg(short, long)]
        data: PathBuf,
        /// Fetch straight from the data file, bypassing the cache
        #[arg(long)]
        no_cache: bool,
        /// Template text, or `-` for standard input
        template: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "forma",
            "render",
            "--data",
            "records.json",
            "Hi {{ user.name }}",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        let mut config = FormaConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);

        let Commands::Render { data, no_cache, template } = cli.command else { panic!("expected render") };
        assert_eq!(data, PathBuf::from("records.json"));
        assert!(!no_cache);
        assert_eq!(template, "Hi {{ user.name }}");
    }

    #[test]
    fn pretty_requires_emit() {
        assert!(Cli::try_parse_from(["forma", "inspect", "doc.json", "--pretty"]).is_err());
        assert!(Cli::try_parse_from(["forma", "inspect", "doc.json", "--emit", "--pretty"]).is_ok());
    }
}
