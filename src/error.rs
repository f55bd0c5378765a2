use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// No authenticated account session to query
    #[error("Account client unavailable: not logged in")]
    AccountClientUnavailable,

    /// Remote account-details call failed or returned no content
    #[error("Catalog fetch failed: {0}")]
    CatalogFetchFailed(String),

    /// A price component used by a combo is not a finite, non-negative number
    #[error("Invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Short, stable name used as a log field and metric label
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AccountClientUnavailable => "account_client_unavailable",
            Self::CatalogFetchFailed(_) => "catalog_fetch_failed",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::ConfigError(_) => "config_error",
        }
    }

    /// Whether the next `update_all` may succeed without user action.
    ///
    /// A missing session only recovers after login; a malformed price only
    /// after the upstream catalog changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CatalogFetchFailed(_) => true,
            Self::AccountClientUnavailable | Self::InvalidPrice { .. } | Self::ConfigError(_) => {
                false
            }
        }
    }
}
