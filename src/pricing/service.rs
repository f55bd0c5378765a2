use crate::error::AppError;
use crate::metrics;
use crate::pricing::cache::PriceCache;
use crate::pricing::calculator::ComboPriceCalculator;
use crate::pricing::fetcher::CatalogFetcher;
use crate::pricing::models::{ComboOptions, PriceCatalog};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Outcome of one batch price update
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Combos whose `computed_price` was written
    pub updated: usize,
    /// Combos skipped because their price could not be computed
    pub failed: Vec<(String, AppError)>,
    /// Set when no catalog was available; no combo was touched
    pub catalog_error: Option<AppError>,
}

impl UpdateReport {
    pub fn is_complete(&self) -> bool {
        self.catalog_error.is_none() && self.failed.is_empty()
    }
}

/// Keeps combo display prices in sync with the account price catalog
pub struct ComboPriceService {
    fetcher: Arc<dyn CatalogFetcher>,
    calculator: ComboPriceCalculator,
    cache: RwLock<PriceCache>,
    /// Serializes catalog fetches so concurrent refreshes share one request
    fetch_lock: Mutex<()>,
}

impl ComboPriceService {
    pub fn new(
        fetcher: Arc<dyn CatalogFetcher>,
        calculator: ComboPriceCalculator,
        cache: PriceCache,
    ) -> Self {
        Self {
            fetcher,
            calculator,
            cache: RwLock::new(cache),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn calculator(&self) -> &ComboPriceCalculator {
        &self.calculator
    }

    /// Catalog currently held by the cache, if still fresh
    pub async fn current_catalog(&self) -> Option<Arc<PriceCatalog>> {
        self.cache.read().await.get()
    }

    /// Forget the cached catalog so the next update fetches a new one
    pub async fn invalidate(&self) {
        self.cache.write().await.invalidate();
        debug!("Price catalog cache invalidated");
    }

    /// Return a fresh catalog from cache, fetching it if needed
    pub async fn ensure_catalog(&self) -> Result<Arc<PriceCatalog>, AppError> {
        if let Some(catalog) = self.cache.read().await.get() {
            metrics::record_cache_lookup(true);
            return Ok(catalog);
        }
        metrics::record_cache_lookup(false);

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(catalog) = self.cache.read().await.get() {
            metrics::record_cache_lookup(true);
            return Ok(catalog);
        }

        let catalog = match self.fetcher.fetch().await {
            Ok(catalog) => {
                metrics::record_catalog_fetch("success");
                Arc::new(catalog)
            }
            Err(e) => {
                metrics::record_catalog_fetch(e.type_name());
                return Err(e);
            }
        };

        self.cache.write().await.set(catalog.clone());
        info!("Price catalog refreshed");

        Ok(catalog)
    }

    /// Recompute `computed_price` for every combo.
    ///
    /// One catalog is shared by the whole batch. If it cannot be obtained,
    /// every combo keeps its previous price. A combo whose price cannot be
    /// computed is skipped without affecting the others.
    pub async fn update_all(&self, combos: &mut [ComboOptions]) -> UpdateReport {
        match self.batch_catalog().await {
            Ok(catalog) => self.apply(&catalog, combos),
            Err(report) => report,
        }
    }

    /// Catalog for the next batch, or the report of a batch that touched nothing
    pub async fn batch_catalog(&self) -> Result<Arc<PriceCatalog>, UpdateReport> {
        self.ensure_catalog().await.map_err(|e| {
            match &e {
                AppError::AccountClientUnavailable => {
                    warn!("Not logged in, keeping current combo prices")
                }
                _ => warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    "Failed to get price catalog, keeping current combo prices"
                ),
            }
            UpdateReport {
                catalog_error: Some(e),
                ..Default::default()
            }
        })
    }

    /// Price every combo from an already obtained catalog. Never awaits.
    pub fn apply(&self, catalog: &PriceCatalog, combos: &mut [ComboOptions]) -> UpdateReport {
        let mut report = UpdateReport::default();

        for combo in combos.iter_mut() {
            match self.calculator.calculate(catalog, &combo.flags()) {
                Ok(price) => {
                    debug!(combo = %combo.title(), price, "Combo price computed");
                    metrics::update_combo_price(combo.title(), price);
                    combo.set_computed_price(price);
                    report.updated += 1;
                }
                Err(e) => {
                    warn!(combo = %combo.title(), error = %e, "Failed to compute combo price");
                    metrics::record_combo_failure(combo.title(), e.type_name());
                    report.failed.push((combo.title().to_string(), e));
                }
            }
        }

        report
    }

    /// Manual "refresh prices": drop the cache, then update every combo
    pub async fn refresh(&self, combos: &mut [ComboOptions]) -> UpdateReport {
        self.invalidate().await;
        self.update_all(combos).await
    }
}
