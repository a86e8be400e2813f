//! CoinGecko public API client

use super::{CoinListing, MarketData, PriceQuote};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

const USER_AGENT: &str = concat!("coin-bot/", env!("CARGO_PKG_VERSION"));

/// Per-coin object returned by `/simple/price`
#[derive(Debug, Default, Deserialize)]
struct SimplePriceEntry {
    #[serde(default)]
    usd: Option<f64>,
    #[serde(default)]
    usd_24h_change: Option<f64>,
    #[serde(default)]
    usd_market_cap: Option<f64>,
}

/// CoinGecko client
pub struct CoinGeckoClient {
    client: Client,
    api_base: String,
}

impl CoinGeckoClient {
    /// Create a client using the base URL and timeout from `config`
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!(%url, "CoinGecko request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::ApiError(format!(
                "CoinGecko API error {status}: {body}"
            )));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(BotError::ApiError("Empty response from CoinGecko".to_string()));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl MarketData for CoinGeckoClient {
    async fn coin_list(&self) -> Result<Vec<CoinListing>> {
        let coins: Vec<CoinListing> = self.get_json("/coins/list", &[]).await?;
        tracing::debug!(count = coins.len(), "fetched coin list");
        Ok(coins)
    }

    async fn simple_price(&self, coin_id: &str) -> Result<Option<PriceQuote>> {
        let mut body: HashMap<String, SimplePriceEntry> = self
            .get_json(
                "/simple/price",
                &[
                    ("ids", coin_id),
                    ("vs_currencies", "usd"),
                    ("include_24hr_change", "true"),
                    ("include_market_cap", "true"),
                ],
            )
            .await?;

        Ok(body.remove(coin_id).map(|entry| {
            PriceQuote::new(
                coin_id,
                entry.usd.unwrap_or_default(),
                entry.usd_24h_change,
                entry.usd_market_cap.unwrap_or_default(),
            )
        }))
    }
}
