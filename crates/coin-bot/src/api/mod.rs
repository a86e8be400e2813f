//! Price provider access
//!
//! [`MarketData`] is the seam between the bot and the outside world; the
//! production implementation is [`CoinGeckoClient`].

pub mod coingecko;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use coingecko::CoinGeckoClient;

/// One entry of the provider's coin catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListing {
    /// Canonical machine identifier, e.g. `bitcoin`
    pub id: String,
    /// Ticker symbol, e.g. `btc`
    pub symbol: String,
    /// Display name, e.g. `Bitcoin`
    pub name: String,
}

impl CoinListing {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Current market numbers for one coin, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub coin_id: String,
    pub price: f64,
    /// Trailing 24h change in percent; the provider omits it for thin markets
    pub change_24h: Option<f64>,
    /// Zero when the provider does not know it
    pub market_cap: f64,
}

impl PriceQuote {
    pub fn new(
        coin_id: impl Into<String>,
        price: f64,
        change_24h: Option<f64>,
        market_cap: f64,
    ) -> Self {
        Self {
            coin_id: coin_id.into(),
            price,
            change_24h,
            market_cap,
        }
    }

    /// 24h change with a missing value read as zero
    pub fn change_or_zero(&self) -> f64 {
        self.change_24h.filter(|c| c.is_finite()).unwrap_or(0.0)
    }
}

/// Source of coin catalog and price data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the full coin catalog
    async fn coin_list(&self) -> Result<Vec<CoinListing>>;

    /// Fetch the USD quote for a coin id; `Ok(None)` when the provider does
    /// not know the id
    async fn simple_price(&self, coin_id: &str) -> Result<Option<PriceQuote>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_or_zero() {
        assert_eq!(PriceQuote::new("x", 1.0, None, 0.0).change_or_zero(), 0.0);
        assert_eq!(PriceQuote::new("x", 1.0, Some(f64::NAN), 0.0).change_or_zero(), 0.0);
        assert_eq!(PriceQuote::new("x", 1.0, Some(-2.5), 0.0).change_or_zero(), -2.5);
    }
}
