use crate::pricing::models::PriceCatalog;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default validity window of a fetched catalog
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Last fetched price catalog and when it was fetched.
///
/// The entry is replaced wholesale on every `set`. An expired entry stays in
/// memory but is reported as absent.
#[derive(Debug)]
pub struct PriceCache {
    catalog: Option<Arc<PriceCatalog>>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl PriceCache {
    /// Create an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            catalog: None,
            fetched_at: None,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn fetched_at(&self) -> Option<Instant> {
        self.fetched_at
    }

    /// Get the catalog if it is still fresh
    pub fn get(&self) -> Option<Arc<PriceCatalog>> {
        self.get_at(Instant::now())
    }

    /// Get the catalog as seen at `now`
    pub fn get_at(&self, now: Instant) -> Option<Arc<PriceCatalog>> {
        let fetched_at = self.fetched_at?;
        // A clock reading before the fetch counts as age zero
        if now.saturating_duration_since(fetched_at) < self.ttl {
            self.catalog.clone()
        } else {
            None
        }
    }

    /// Store a freshly fetched catalog
    pub fn set(&mut self, catalog: Arc<PriceCatalog>) {
        self.set_at(catalog, Instant::now());
    }

    /// Store a catalog fetched at `now`
    pub fn set_at(&mut self, catalog: Arc<PriceCatalog>, now: Instant) {
        self.catalog = Some(catalog);
        self.fetched_at = Some(now);
    }

    /// Drop the cached catalog unconditionally
    pub fn invalidate(&mut self) {
        self.catalog = None;
        self.fetched_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Arc<PriceCatalog> {
        Arc::new(PriceCatalog {
            base_photo_price: Some(10.0),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_cache_returns_none() {
        let cache = PriceCache::default();
        assert!(cache.get().is_none());
        assert!(cache.fetched_at().is_none());
    }

    #[test]
    fn test_ttl_window_boundaries() {
        let mut cache = PriceCache::default();
        let t = Instant::now();
        cache.set_at(sample_catalog(), t);

        assert!(cache.get_at(t).is_some());
        assert!(cache.get_at(t + Duration::from_secs(299)).is_some());
        assert!(cache
            .get_at(t + DEFAULT_CACHE_TTL - Duration::from_millis(1))
            .is_some());

        assert!(cache.get_at(t + DEFAULT_CACHE_TTL).is_none());
        assert!(cache.get_at(t + Duration::from_secs(3600)).is_none());
    }

    #[test]
    fn test_expired_entry_is_kept_until_replaced() {
        let mut cache = PriceCache::new(Duration::from_secs(1));
        let t = Instant::now();
        cache.set_at(sample_catalog(), t);

        assert!(cache.get_at(t + Duration::from_secs(2)).is_none());
        // Expiry does not clear state
        assert_eq!(cache.fetched_at(), Some(t));
    }

    #[test]
    fn test_set_replaces_previous_entry() {
        let mut cache = PriceCache::default();
        let t = Instant::now();
        cache.set_at(sample_catalog(), t);

        let newer = Arc::new(PriceCatalog {
            base_photo_price: Some(42.0),
            ..Default::default()
        });
        let later = t + Duration::from_secs(200);
        cache.set_at(newer.clone(), later);

        let got = cache.get_at(later + Duration::from_secs(200)).unwrap();
        assert!(Arc::ptr_eq(&got, &newer));
    }

    #[test]
    fn test_invalidate_then_get_returns_none() {
        let mut cache = PriceCache::default();
        cache.invalidate();
        assert!(cache.get().is_none());

        cache.set(sample_catalog());
        assert!(cache.get().is_some());

        cache.invalidate();
        assert!(cache.get().is_none());
        assert!(cache.fetched_at().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_follows_runtime_clock() {
        let mut cache = PriceCache::default();
        cache.set(sample_catalog());

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.get().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get().is_none());
    }
}
