//! Short-lived quote cache to spare the provider repeated lookups

use crate::api::PriceQuote;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe cache of price quotes keyed by coin id.
///
/// A zero TTL turns every call into a miss.
pub struct QuoteCache {
    cache: Option<Arc<RwLock<TimedCache<String, PriceQuote>>>>,
}

impl QuoteCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))));
        Self { cache }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn get(&self, coin_id: &str) -> Option<PriceQuote> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.write().await;
        cache.cache_get(coin_id).cloned()
    }

    pub async fn insert(&self, quote: PriceQuote) {
        if let Some(cache) = &self.cache {
            let mut cache = cache.write().await;
            let _ = cache.cache_set(quote.coin_id.clone(), quote);
        }
    }

    /// Get or fetch a quote using the provided fetcher function.
    ///
    /// Only `Ok(Some(_))` results are stored; misses and errors are not.
    pub async fn get_or_fetch<F, Fut, E>(&self, coin_id: &str, fetcher: F) -> Result<Option<PriceQuote>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Option<PriceQuote>, E>>,
    {
        if let Some(quote) = self.get(coin_id).await {
            tracing::debug!(coin_id, "quote cache hit");
            return Ok(Some(quote));
        }

        tracing::debug!(coin_id, "quote cache miss");
        let fetched = fetcher().await?;

        if let Some(quote) = &fetched {
            self.insert(quote.clone()).await;
        }

        Ok(fetched)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.write().await.cache_clear();
        }
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.read().await.cache_size(),
            None => 0,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for QuoteCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.as_ref().map(Arc::clone),
        }
    }
}
