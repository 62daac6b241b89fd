//! CLI command definitions for the `skillbook` binary.
//!
//! Uses clap derive macros for argument parsing. Besides `serve`, every
//! command runs one skill operation directly against the configured database.

pub mod skill;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Track your skills and how confident you are in each.
#[derive(Parser)]
#[command(name = "skillbook", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Path to config.toml (defaults to ~/.skillbook/config.toml).
    #[arg(long, global = true, env = "SKILLBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL, overriding the config file.
    #[arg(long, global = true, env = "SKILLBOOK_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// List skills.
    #[command(alias = "ls")]
    List {
        /// Number of skills to skip.
        #[arg(long, default_value = "0")]
        offset: u64,

        /// Maximum number of skills to show.
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Add a new skill.
    Add {
        /// Skill name (must be unique).
        name: String,

        /// Confidence level: LEVEL_1, LEVEL_2 or LEVEL_3.
        #[arg(short, long, default_value = "LEVEL_1")]
        level: String,
    },

    /// Show one skill, by id or by name.
    Show {
        /// Numeric id or exact name.
        skill: String,
    },

    /// Rename a skill.
    Rename {
        /// Skill id.
        id: i64,

        /// New unique name.
        new_name: String,
    },

    /// Change a skill's confidence level.
    Level {
        /// Skill id.
        id: i64,

        /// New level: LEVEL_1, LEVEL_2 or LEVEL_3.
        level: String,
    },

    /// Delete a skill.
    #[command(alias = "rm")]
    Delete {
        /// Skill id.
        id: i64,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["skillbook", "add", "python", "--level", "LEVEL_2"]).unwrap();
        match cli.command {
            Commands::Add { name, level } => {
                assert_eq!(name, "python");
                assert_eq!(level, "LEVEL_2");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_config_flag_takes_path() {
        let cli = Cli::try_parse_from(["skillbook", "--config", "/tmp/sb.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sb.toml")));
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["skillbook", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { port: Some(9000), host: None }
        ));
    }
}
