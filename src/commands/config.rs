use anyhow::Result;
use colored::Colorize;
use lesser_dashboard::config::Config;
use lesser_dashboard::logging::mask_token;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with the account token masked
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    let sanitized = sanitize_secrets(cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary
pub fn validate(cfg: &Config) -> Result<()> {
    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Account API".cyan(), cfg.account.base_url);
    println!(
        "  {}: {}",
        "Session".cyan(),
        if cfg.account.token.is_some() {
            "token configured".green()
        } else {
            "logged out".yellow()
        }
    );
    println!(
        "  {}: {}s",
        "Catalog cache TTL".cyan(),
        cfg.pricing.cache_ttl_seconds
    );
    println!("  {}: {}", "Basket size".cyan(), cfg.pricing.basket_size);
    println!(
        "  {}: {}",
        "Log".cyan(),
        format!("{} ({})", cfg.logging.level, cfg.logging.format)
    );

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.account.token = mask_token(cfg.account.token.as_deref());
    sanitized
}
