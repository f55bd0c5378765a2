use crate::config::AccountConfig;
use crate::error::AppError;
use crate::logging::SensitiveToken;
use crate::pricing::models::PriceCatalog;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Source of fresh price catalogs for the logged-in account
#[async_trait]
pub trait CatalogFetcher: Send + Sync + 'static {
    /// Fetch the current catalog.
    ///
    /// Fails with `AccountClientUnavailable` when there is no session and with
    /// `CatalogFetchFailed` when the remote call fails or returns no content.
    async fn fetch(&self) -> Result<PriceCatalog, AppError>;
}

/// Envelope returned by the account API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetailsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content: Option<AccountDetails>,
}

/// Account details payload. Only the price fields are decoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    #[serde(default)]
    pub base_photo_price: Option<f64>,
    #[serde(default)]
    pub face_relevance_detection_price: Option<f64>,
    #[serde(default)]
    pub hd_backup_price: Option<f64>,
    #[serde(default)]
    pub auto_treatment_price: Option<f64>,
    #[serde(default)]
    pub ocr_price: Option<f64>,
    #[serde(default)]
    pub photo_distribution_price: Option<f64>,
}

impl From<AccountDetails> for PriceCatalog {
    fn from(details: AccountDetails) -> Self {
        Self {
            base_photo_price: details.base_photo_price,
            face_relevance_detection_price: details.face_relevance_detection_price,
            hd_backup_price: details.hd_backup_price,
            auto_treatment_price: details.auto_treatment_price,
            ocr_price: details.ocr_price,
            photo_distribution_price: details.photo_distribution_price,
        }
    }
}

impl AccountDetailsResponse {
    /// Turn the envelope into a catalog, rejecting failures and empty content
    pub fn into_catalog(self) -> Result<PriceCatalog, AppError> {
        if !self.success {
            return Err(AppError::CatalogFetchFailed(
                self.message
                    .unwrap_or_else(|| "account details request reported failure".to_string()),
            ));
        }

        self.content
            .map(PriceCatalog::from)
            .ok_or_else(|| AppError::CatalogFetchFailed("account details returned no content".to_string()))
    }
}

/// Fetches the catalog from `GET {base_url}/account/details`
pub struct HttpCatalogFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
    /// Bearer token of the current session, `None` when logged out
    session: RwLock<Option<String>>,
}

impl HttpCatalogFetcher {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            session: RwLock::new(None),
        }
    }

    /// Build a fetcher from configuration, logging in if a token is configured
    pub fn from_config(config: &AccountConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let token = config.token.clone().filter(|t| !t.is_empty());
        if let Some(token) = &token {
            debug!(token = %SensitiveToken::new(token), "Using configured account token");
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            session: RwLock::new(token),
        })
    }

    /// Start a session with the given bearer token
    pub async fn login(&self, token: impl Into<String>) {
        let token = token.into();
        info!(token = %SensitiveToken::new(&token), "Account session started");
        *self.session.write().await = Some(token);
    }

    /// Drop the current session
    pub async fn logout(&self) {
        if self.session.write().await.take().is_some() {
            info!("Account session ended");
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    fn details_url(&self) -> String {
        format!("{}/account/details", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self) -> Result<PriceCatalog, AppError> {
        let token = self
            .session
            .read()
            .await
            .clone()
            .ok_or(AppError::AccountClientUnavailable)?;

        let url = self.details_url();
        debug!(url = %url, "Fetching account price catalog");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::CatalogFetchFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::CatalogFetchFailed(format!("HTTP {}", status)));
        }

        let body: AccountDetailsResponse = response
            .json()
            .await
            .map_err(|e| AppError::CatalogFetchFailed(format!("invalid response body: {}", e)))?;

        body.into_catalog()
    }
}
