use crate::config;
use crate::error::NBNError;
use crate::models::{AllIndices, ContractInfo, LiveIndex, MarketStatus, OptionChain};
use anyhow::{Context, Result};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

// -----------------------------------------------
// MARKET DATA INTERFACE
// -----------------------------------------------

/// Source of raw market records consumed by the commands
#[allow(async_fn_in_trait)]
pub trait MarketDataSource {
    async fn market_status(&self) -> Result<MarketStatus>;

    async fn all_indices(&self) -> Result<AllIndices>;

    async fn live_index(&self, index: &str) -> Result<LiveIndex>;

    async fn live_fno(&self) -> Result<Value>;

    async fn derivative_turnover(&self) -> Result<Value>;

    async fn market_turnover(&self) -> Result<Value>;

    async fn contract_info(&self, symbol: &str) -> Result<ContractInfo>;

    async fn option_chain(&self, symbol: &str, expiry: &str) -> Result<OptionChain>;
}

// -----------------------------------------------
// CLIENT WRAPPER WITH SESSION STATE
// -----------------------------------------------
pub struct NSEClient {
    client: Client,
    warmed_up: RwLock<bool>,
}

impl NSEClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            warmed_up: RwLock::new(false),
        })
    }

    /// Warmup NSE session (only once per client)
    async fn warmup_if_needed(&self) -> Result<()> {
        if *self.warmed_up.read().await {
            return Ok(());
        }

        let mut warmed = self.warmed_up.write().await;
        if !*warmed {
            debug!(url = config::NSE_BASE_URL, "warming up NSE session");
            self.client
                .get(config::NSE_BASE_URL)
                .header(header::ACCEPT, config::HEADER_ACCEPT_HTML)
                .send()
                .await
                .context("Failed to warm up NSE session")?;

            tokio::time::sleep(Duration::from_millis(config::WARMUP_DELAY_MS)).await;
            *warmed = true;
        }

        Ok(())
    }

    /// Generic retry fetch
    ///
    /// Rate limits and server errors are retried with exponential backoff,
    /// other client errors fail fast.
    async fn fetch_json(&self, url: &str) -> Result<String> {
        self.warmup_if_needed().await?;

        let backoff = ExponentialBackoff::from_millis(config::RETRY_BASE_DELAY_MS)
            .factor(config::RETRY_FACTOR)
            .max_delay(Duration::from_secs(config::RETRY_MAX_DELAY_SECS))
            .take(config::RETRY_MAX_ATTEMPTS);

        Retry::spawn(backoff, || async {
            debug!(url, "GET");
            let res = self
                .client
                .get(url)
                .header(header::REFERER, config::HEADER_REFERER)
                .header("X-Requested-With", config::HEADER_X_REQUESTED_WITH)
                .send()
                .await
                .map_err(NBNError::from)
                .context("Request send failed")?;

            let status = res.status();

            if status.is_success() {
                let text = res.text().await.context("Failed to read body")?;

                let trimmed = text.trim();
                if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                    let preview: String = text.chars().take(200).collect();
                    return Err(anyhow::Error::new(NBNError::NonJsonResponse(preview)));
                }

                Ok(text)
            } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                warn!(url, %status, "retryable response from NSE");
                anyhow::bail!("Retryable error: {}", status)
            } else {
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                anyhow::bail!("Client error {}: {}", status, preview)
            }
        })
        .await
    }

    async fn fetch_parsed<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let text = self.fetch_json(url).await?;
        let parsed = serde_json::from_str(&text)
            .map_err(NBNError::from)
            .with_context(|| format!("Failed to parse {}", what))?;
        Ok(parsed)
    }
}

impl MarketDataSource for NSEClient {
    async fn market_status(&self) -> Result<MarketStatus> {
        self.fetch_parsed(config::NSE_API_MARKET_STATUS, "market status").await
    }

    async fn all_indices(&self) -> Result<AllIndices> {
        self.fetch_parsed(config::NSE_API_ALL_INDICES, "all indices").await
    }

    async fn live_index(&self, index: &str) -> Result<LiveIndex> {
        let url = config::nse_live_index_url(index);
        self.fetch_parsed(&url, "live index").await
    }

    async fn live_fno(&self) -> Result<Value> {
        let url = config::nse_live_index_url(config::LIVE_FNO_INDEX);
        self.fetch_parsed(&url, "live F&O data").await
    }

    async fn derivative_turnover(&self) -> Result<Value> {
        let url = config::nse_derivative_turnover_url(config::DERIVATIVE_TURNOVER_CONTRACTS);
        self.fetch_parsed(&url, "derivative turnover").await
    }

    async fn market_turnover(&self) -> Result<Value> {
        self.fetch_parsed(config::NSE_API_MARKET_TURNOVER, "market turnover").await
    }

    async fn contract_info(&self, symbol: &str) -> Result<ContractInfo> {
        let url = config::nse_contract_info_url(symbol);
        self.fetch_parsed(&url, "contract info").await
    }

    async fn option_chain(&self, symbol: &str, expiry: &str) -> Result<OptionChain> {
        let url = config::nse_option_chain_url("Indices", symbol, expiry);
        self.fetch_parsed(&url, "option chain").await
    }
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    // Rotating Accept-Language headers
    let lang = config::ACCEPT_LANGUAGES
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or("en-US,en;q=0.9");
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_str(lang)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
