use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use lesser_dashboard::config::{self, LoggingConfig};
use lesser_dashboard::{init_tracing, metrics};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    let command = args.get_command();
    if let cli::Commands::Version = command {
        println!("Lesser Dashboard v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Logging settings come from the config, so load it before tracing starts
    let cfg = match config::load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, path = %args.config.display(), "Failed to load configuration");
            return Err(e);
        }
    };

    init_tracing(&cfg.logging);
    metrics::init_metric_descriptions();

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Prices { detailed, watch } => {
            commands::prices::execute(&cfg, detailed, watch).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg)?,
        },
        // Printed before configuration is loaded
        cli::Commands::Version => {}
    }

    Ok(())
}
