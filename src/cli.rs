use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lesser-dashboard", version, about = "Combo pricing for the photo dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "lesser-dashboard.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch the account catalog and print combo prices (default)
    Prices {
        /// Show the per-feature breakdown in cents
        #[arg(short, long)]
        detailed: bool,

        /// Keep running and reprint prices on every refresh
        #[arg(short, long)]
        watch: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with token masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Prices if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Prices {
            detailed: false,
            watch: false,
        })
    }
}
