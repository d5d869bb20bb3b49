use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{APP_NAME_LOWER, ENV_CONFIG, ENV_MAX_BYTES, ENV_MAX_DEPTH};

#[derive(Parser)]
#[command(name = APP_NAME_LOWER)]
#[command(version, about = "Compile document-store filters into Vespa YQL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Maximum filter nesting depth
    #[arg(long, global = true, env = ENV_MAX_DEPTH)]
    pub max_depth: Option<u32>,

    /// Maximum filter JSON size in bytes
    #[arg(long, global = true, env = ENV_MAX_BYTES)]
    pub max_bytes: Option<usize>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Commands {
    /// Compile a filter into a YQL where-clause fragment (default command)
    Compile {
        /// Filter JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Prefix the fragment with "where "
        #[arg(long = "where")]
        with_where: bool,
    },
    /// Validate a filter and report the first error
    Check {
        /// Filter JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Compile {
            input: None,
            with_where: false,
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub max_depth: Option<u32>,
    pub max_bytes: Option<usize>,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            max_depth: cli.max_depth,
            max_bytes: cli.max_bytes,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig::from(&cli);
    (config, cli.command.unwrap_or_default())
}
