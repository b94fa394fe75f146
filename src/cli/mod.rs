//! Command-line interface for querysh.
//!
//! Handles argument parsing, configuration loading, and subcommand
//! dispatch before the interactive console starts.

pub mod completion;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// querysh - completion console for a fluent SQL query-builder DSL
#[derive(Parser, Debug)]
#[command(
    name = "querysh",
    version,
    about = "Query-builder completion console",
    long_about = "An interactive console for a fluent SQL query-builder DSL. Loads a JSON \
schema and provides context-aware completion, hover documentation, and chain inspection."
)]
pub struct CliArgs {
    /// Path to the schema JSON file
    ///
    /// Shape: { "tables": [{ "name": ..., "columns": [...] }] }.
    /// Without one, a small demo schema is loaded.
    #[arg(value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Suppress the startup banner
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion scripts
    Completion {
        /// Shell type (bash, zsh, fish)
        shell: String,
    },

    /// Print the resolved configuration
    Config,
}

/// Parsed arguments plus loaded configuration.
pub struct CliInterface {
    args: CliArgs,
    config: Config,
}

impl CliInterface {
    /// Parse arguments and load configuration.
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let mut config = Config::load(args.config_file.as_deref())?;

        // CLI flags override the file.
        if args.no_color {
            config.display.color_output = false;
        }

        Ok(Self { args, config })
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.args.config_file.as_deref()
    }

    /// Effective log filter directive: CLI flag wins over config.
    pub fn log_filter(&self) -> String {
        match &self.args.log_level {
            Some(level) => level.clone(),
            None => self.config.logging.level.as_filter().to_string(),
        }
    }

    /// Handle subcommands. Returns `true` when one ran and the program
    /// should exit.
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config) => {
                println!("{}", self.config.to_toml()?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Print the startup banner unless quiet.
    pub fn print_banner(&self, schema_name: &str, table_count: usize) {
        if self.args.quiet {
            return;
        }
        println!("querysh {}", crate::VERSION);
        println!(
            "schema '{}' loaded ({} tables). Tab completes; 'help' lists commands.",
            schema_name, table_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_schema_positional() {
        let args = CliArgs::parse_from(["querysh", "schema.json"]);
        assert_eq!(args.schema.unwrap(), PathBuf::from("schema.json"));
        assert!(!args.quiet);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["querysh", "--no-color", "-q", "--log-level", "debug"]);
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_completion_subcommand() {
        let args = CliArgs::parse_from(["querysh", "completion", "zsh"]);
        match args.command {
            Some(Commands::Completion { shell }) => assert_eq!(shell, "zsh"),
            _ => panic!("expected completion subcommand"),
        }
    }
}
