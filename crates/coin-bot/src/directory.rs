//! In-memory coin directory built from the provider's catalog

use crate::api::{CoinListing, MarketData};
use crate::resolver::{self, CoinMap};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Tickers that many tokens reuse; these always point at the major coin
const PINNED_ALIASES: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("ADA", "cardano"),
    ("DOT", "polkadot"),
    ("MATIC", "matic-network"),
    ("AVAX", "avalanche-2"),
    ("SHIB", "shiba-inu"),
    ("DOGE", "dogecoin"),
    ("XRP", "ripple"),
    ("BNB", "binancecoin"),
    ("LTC", "litecoin"),
];

/// Build the lookup map from a catalog snapshot.
///
/// Priority on key collisions: pinned alias, id, symbol, name, then the
/// punctuation-free form of each. Within one tier the first listing wins.
pub fn build_map(coins: &[CoinListing]) -> CoinMap {
    let mut map = CoinMap::new();
    let ids: HashSet<&str> = coins.iter().map(|c| c.id.as_str()).collect();

    for (alias, id) in PINNED_ALIASES {
        if ids.contains(id) {
            map.insert((*alias).to_string(), (*id).to_string());
        }
    }

    let tiers: [fn(&CoinListing) -> &str; 3] = [
        |c| c.id.as_str(),
        |c| c.symbol.as_str(),
        |c| c.name.as_str(),
    ];
    for field in tiers {
        for coin in coins {
            let key = resolver::normalize_key(field(coin));
            if !key.is_empty() {
                map.entry(key).or_insert_with(|| coin.id.clone());
            }
        }
    }

    for field in tiers {
        for coin in coins {
            let key = resolver::sanitize(&resolver::normalize_key(field(coin)));
            if !key.is_empty() {
                map.entry(key).or_insert_with(|| coin.id.clone());
            }
        }
    }

    map
}

/// How long a failed catalog fetch is remembered before the next attempt
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Default)]
struct Snapshot {
    map: Option<Arc<CoinMap>>,
    failed_at: Option<Instant>,
}

/// Lazily loaded, reloadable coin directory.
///
/// The first [`load`](Self::load) fetches the catalog once; the snapshot is
/// kept until [`reload`](Self::reload). A failed fetch yields an empty map and
/// is remembered for the retry backoff, so an outage costs one catalog
/// request per backoff window instead of one per message.
pub struct CoinDirectory {
    source: Arc<dyn MarketData>,
    snapshot: RwLock<Snapshot>,
    retry_backoff: Duration,
}

impl CoinDirectory {
    pub fn new(source: Arc<dyn MarketData>) -> Self {
        Self::with_retry_backoff(source, DEFAULT_RETRY_BACKOFF)
    }

    pub fn with_retry_backoff(source: Arc<dyn MarketData>, retry_backoff: Duration) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Snapshot::default()),
            retry_backoff,
        }
    }

    /// Return the cached map, fetching it on first use
    pub async fn load(&self) -> Arc<CoinMap> {
        {
            let snapshot = self.snapshot.read().await;
            if let Some(map) = snapshot.map.as_ref() {
                return Arc::clone(map);
            }
            if self.backing_off(&snapshot) {
                return Arc::default();
            }
        }

        let mut guard = self.snapshot.write().await;
        // Another task may have loaded, or failed, while we waited for the lock
        if let Some(map) = guard.map.as_ref() {
            return Arc::clone(map);
        }
        if self.backing_off(&guard) {
            return Arc::default();
        }

        self.install(&mut guard).await.unwrap_or_default()
    }

    /// Fetch a fresh snapshot. On failure the previous one is kept.
    pub async fn reload(&self) -> Arc<CoinMap> {
        let mut guard = self.snapshot.write().await;
        match self.install(&mut guard).await {
            Some(map) => map,
            None => guard.map.clone().unwrap_or_default(),
        }
    }

    fn backing_off(&self, snapshot: &Snapshot) -> bool {
        snapshot
            .failed_at
            .is_some_and(|at| at.elapsed() < self.retry_backoff)
    }

    async fn install(&self, snapshot: &mut Snapshot) -> Option<Arc<CoinMap>> {
        let fetched = self.fetch().await;
        match &fetched {
            Some(map) => {
                snapshot.map = Some(Arc::clone(map));
                snapshot.failed_at = None;
            }
            None => snapshot.failed_at = Some(Instant::now()),
        }
        fetched
    }

    async fn fetch(&self) -> Option<Arc<CoinMap>> {
        match self.source.coin_list().await {
            Ok(coins) => {
                let map = build_map(&coins);
                tracing::info!(coins = coins.len(), keys = map.len(), "coin directory loaded");
                Some(Arc::new(map))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    retry_in = ?self.retry_backoff,
                    "coin list unavailable, lookups will report not found"
                );
                None
            }
        }
    }

    /// Resolve user text to a coin id
    pub async fn resolve(&self, text: &str) -> Option<String> {
        let map = self.load().await;
        resolver::resolve_in(&map, text)
    }

    /// Case-insensitive substring search over directory keys.
    ///
    /// Shorter keys sort first; each coin id appears at most once.
    pub async fn search(&self, term: &str, limit: usize) -> Vec<(String, String)> {
        let needle = resolver::normalize_key(term);
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let map = self.load().await;
        let mut hits: Vec<(&String, &String)> =
            map.iter().filter(|(key, _)| key.contains(&needle)).collect();
        hits.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(b.0)));

        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|(_, id)| seen.insert(*id))
            .take(limit)
            .map(|(key, id)| (key.clone(), id.clone()))
            .collect()
    }

    /// Number of keys in the loaded snapshot, zero before the first load
    pub async fn len(&self) -> usize {
        self.snapshot.read().await.map.as_ref().map_or(0, |m| m.len())
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketData;
    use crate::error::BotError;

    fn catalog() -> Vec<CoinListing> {
        vec![
            CoinListing::new("batcat", "btc", "BatCat"),
            CoinListing::new("bitcoin", "btc", "Bitcoin"),
            CoinListing::new("bitcoin-cash", "bch", "Bitcoin Cash"),
            CoinListing::new("ethereum", "eth", "Ethereum"),
            CoinListing::new("shiba-inu", "shib", "Shiba Inu"),
            CoinListing::new("wrapped-bitcoin", "wbtc", "Wrapped Bitcoin"),
        ]
    }

    fn directory_with(coins: Vec<CoinListing>, calls: usize) -> CoinDirectory {
        let mut mock = MockMarketData::new();
        mock.expect_coin_list()
            .times(calls)
            .returning(move || Ok(coins.clone()));
        CoinDirectory::new(Arc::new(mock))
    }

    #[test]
    fn test_build_map_priorities() {
        let map = build_map(&catalog());
        // pinned alias beats the earlier "batcat" listing
        assert_eq!(map["BTC"], "bitcoin");
        assert_eq!(map["BITCOIN"], "bitcoin");
        assert_eq!(map["BITCOIN CASH"], "bitcoin-cash");
        assert_eq!(map["BITCOINCASH"], "bitcoin-cash");
        assert_eq!(map["SHIBA-INU"], "shiba-inu");
        assert_eq!(map["SHIBAINU"], "shiba-inu");
    }

    #[test]
    fn test_build_map_first_listing_wins_without_pin() {
        let coins = vec![
            CoinListing::new("alpha-one", "xyz", "Alpha"),
            CoinListing::new("beta-two", "xyz", "Beta"),
        ];
        let map = build_map(&coins);
        assert_eq!(map["XYZ"], "alpha-one");
    }

    #[test]
    fn test_build_map_skips_unlisted_pins_and_blanks() {
        let coins = vec![CoinListing::new("only-coin", "", "  ")];
        let map = build_map(&coins);
        assert!(!map.contains_key("BTC"));
        assert!(!map.contains_key(""));
        assert_eq!(map.len(), 2);
    }

    #[tokio::test]
    async fn test_load_fetches_once() {
        let directory = directory_with(catalog(), 1);
        assert!(directory.is_empty().await);

        let first = directory.load().await;
        let second = directory.load().await;
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!directory.is_empty().await);
    }

    #[tokio::test]
    async fn test_reload_fetches_again() {
        let directory = directory_with(catalog(), 2);
        directory.load().await;
        let reloaded = directory.reload().await;
        assert_eq!(reloaded["ETH"], "ethereum");
    }

    #[tokio::test]
    async fn test_resolve_variants_agree() {
        let directory = directory_with(catalog(), 1);
        let btc = directory.resolve("BTC").await;
        assert_eq!(btc, Some("bitcoin".to_string()));
        assert_eq!(directory.resolve("btc").await, btc);
        assert_eq!(directory.resolve("B-T-C").await, btc);
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_not_found() {
        let mut mock = MockMarketData::new();
        mock.expect_coin_list()
            .times(1)
            .returning(|| Err(BotError::ApiError("unreachable".to_string())));
        let directory = CoinDirectory::new(Arc::new(mock));

        // one request for the whole backoff window, however many lookups
        for text in ["btc", "bitcoin", "eth", "sol"] {
            assert_eq!(directory.resolve(text).await, None);
        }
        assert!(directory.search("bit", 10).await.is_empty());
        assert!(directory.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_failed_fetch() {
        let mut mock = MockMarketData::new();
        mock.expect_coin_list()
            .times(1)
            .returning(|| Err(BotError::ApiError("timeout".to_string())));
        let directory = Arc::new(CoinDirectory::new(Arc::new(mock)));

        let lookups: Vec<_> = (0..8)
            .map(|_| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move { directory.resolve("btc").await })
            })
            .collect();
        for lookup in lookups {
            assert_eq!(lookup.await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_load_retries_after_backoff() {
        let mut mock = MockMarketData::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BotError::ApiError("down".to_string())));
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(catalog()));
        let directory = CoinDirectory::with_retry_backoff(Arc::new(mock), Duration::ZERO);

        assert_eq!(directory.resolve("eth").await, None);
        assert_eq!(directory.resolve("eth").await, Some("ethereum".to_string()));
        // loaded snapshot is reused from here on
        assert_eq!(directory.resolve("btc").await, Some("bitcoin".to_string()));
    }

    #[tokio::test]
    async fn test_reload_ignores_backoff() {
        let mut mock = MockMarketData::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BotError::ApiError("down".to_string())));
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(catalog()));
        let directory = CoinDirectory::new(Arc::new(mock));

        assert!(directory.load().await.is_empty());
        assert_eq!(directory.reload().await["ETH"], "ethereum");
        assert_eq!(directory.resolve("eth").await, Some("ethereum".to_string()));
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_previous_snapshot() {
        let mut mock = MockMarketData::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(catalog()));
        mock.expect_coin_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BotError::ApiError("down".to_string())));
        let directory = CoinDirectory::new(Arc::new(mock));

        directory.load().await;
        let after = directory.reload().await;
        assert_eq!(after["BTC"], "bitcoin");
    }

    #[tokio::test]
    async fn test_search_substring_capped_and_deduplicated() {
        let directory = directory_with(catalog(), 1);

        let hits = directory.search("bitcoin", 10).await;
        let ids: Vec<&str> = hits.iter().map(|(_, id)| id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "bitcoin-cash", "wrapped-bitcoin"]);
        assert_eq!(hits[0].0, "BITCOIN");
        // shortest matching key stands for each id
        assert_eq!(hits[1].0, "BITCOINCASH");
        assert_eq!(hits[2].0, "WRAPPEDBITCOIN");
        assert!(hits.windows(2).all(|w| w[0].0.len() <= w[1].0.len()));

        let capped = directory.search("bitcoin", 2).await;
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn test_search_blank_term_skips_fetch() {
        let directory = directory_with(catalog(), 0);
        assert!(directory.search("   ", 10).await.is_empty());
    }
}
