use crate::pricing::{
    ComboPriceCalculator, PriceCache, DEFAULT_BASKET_SIZE, DEFAULT_CACHE_TTL, DEFAULT_OCR_CENTS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub account: AccountConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Account API the price catalog is read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
    pub base_url: String,

    /// Bearer token of an existing session; absent means logged out
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// How long a fetched catalog stays valid (default: 300)
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,

    /// Photos per quoted basket (default: 1000)
    #[serde(default = "default_basket_size")]
    pub basket_size: u32,

    /// OCR cents per photo when the account has no OCR price (default: 1.15)
    #[serde(default = "default_ocr_default_cents")]
    pub ocr_default_cents: f64,

    /// Refresh interval of `prices --watch` (default: 60)
    #[serde(default = "default_refresh_interval_seconds")]
    pub refresh_interval_seconds: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: default_cache_ttl_seconds(),
            basket_size: default_basket_size(),
            ocr_default_cents: default_ocr_default_cents(),
            refresh_interval_seconds: default_refresh_interval_seconds(),
        }
    }
}

impl PricingConfig {
    pub fn calculator(&self) -> ComboPriceCalculator {
        ComboPriceCalculator::new(self.basket_size, self.ocr_default_cents)
    }

    pub fn cache(&self) -> PriceCache {
        PriceCache::new(Duration::from_secs(self.cache_ttl_seconds))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_basket_size() -> u32 {
    DEFAULT_BASKET_SIZE
}

fn default_ocr_default_cents() -> f64 {
    DEFAULT_OCR_CENTS
}

fn default_refresh_interval_seconds() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Load configuration from `path` (optional file) and `LESSER_DASHBOARD__*` env vars
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("LESSER_DASHBOARD").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let base_url = cfg.account.base_url.trim();
    if base_url.is_empty() {
        anyhow::bail!("account.base_url cannot be empty");
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("account.base_url must be an http(s) URL: {}", base_url);
    }

    if cfg.account.timeout_seconds == 0 {
        anyhow::bail!("account.timeout_seconds must be greater than 0");
    }

    if cfg.pricing.cache_ttl_seconds == 0 {
        anyhow::bail!("pricing.cache_ttl_seconds must be greater than 0");
    }

    if cfg.pricing.basket_size == 0 {
        anyhow::bail!("pricing.basket_size must be greater than 0");
    }

    if cfg.pricing.refresh_interval_seconds == 0 {
        anyhow::bail!("pricing.refresh_interval_seconds must be greater than 0");
    }

    let ocr = cfg.pricing.ocr_default_cents;
    if !ocr.is_finite() || ocr < 0.0 {
        anyhow::bail!("pricing.ocr_default_cents must be a non-negative number");
    }

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid logging.format '{}': expected 'text' or 'json'", other),
    }

    Ok(())
}
