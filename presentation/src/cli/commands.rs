//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for consult-router
#[derive(Parser, Debug)]
#[command(name = "consult-router")]
#[command(author, version, about = "Route consultation questions to consultants over Telegram")]
#[command(long_about = r#"
consult-router runs a Telegram bot that forwards users' questions to a
fixed roster of consultants and relays the consultants' replies back.

Each user is bound to one consultant (round-robin for new users) and may
ask a limited number of questions per calendar month.

Configuration files are loaded from (in priority order):
1. CONSULT_* environment variables (e.g. CONSULT_TELEGRAM__TOKEN)
2. --config <path>      Explicit config file
3. ./consult.toml       Project-level config
4. ~/.config/consult-router/config.toml   Global config

Example:
  CONSULT_TELEGRAM__TOKEN=123:abc consult-router --config consult.toml
  consult-router --stats
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file (rotated daily)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Override the database path from the configuration
    #[arg(long, value_name = "PATH")]
    pub database: Option<String>,

    /// Print the consultant report and exit
    #[arg(long)]
    pub stats: bool,
}
