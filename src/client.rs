use crate::config::Config;
use crate::schema::{PortfolioPayload, TimeSeriesPayload};
use reqwest::Client;
use thiserror::Error;

/// The single failure mode of the backend API: any transport error,
/// non-success status, or undecodable body on any endpoint.
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct RequestFailure {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// HTTP wrapper over the three WealthWise endpoints.
///
/// Holds the injected [`Config`]; callers never touch URLs or the
/// environment. Failures are logged at the point of occurrence and returned
/// to the caller — no retry, no timeout beyond the reqwest defaults.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(concat!("wealthwise-term/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stock_url(&self, symbol: &str) -> String {
        format!("{}/stock/{}", self.config.base_url, symbol.to_uppercase())
    }

    pub fn portfolio_url(&self, username: &str) -> String {
        format!("{}/api/portfolio?user={username}", self.config.base_url)
    }

    pub fn homepage_url(&self) -> String {
        format!("{}/", self.config.base_url)
    }

    /// Fetch the daily price series of a single stock.
    pub async fn fetch_stock_series(&self, symbol: &str) -> Result<TimeSeriesPayload, RequestFailure> {
        let url = self.stock_url(symbol);
        let response = self.get(&url).await?;
        response.json().await.map_err(|source| {
            log::error!("failed to decode stock series from {url}: {source}");
            RequestFailure { url, source }
        })
    }

    /// Fetch the portfolio valuation of a user.
    pub async fn fetch_portfolio(&self, username: &str) -> Result<PortfolioPayload, RequestFailure> {
        let url = self.portfolio_url(username);
        let response = self.get(&url).await?;
        response.json().await.map_err(|source| {
            log::error!("failed to decode portfolio from {url}: {source}");
            RequestFailure { url, source }
        })
    }

    /// Fetch the backend homepage markup.
    pub async fn fetch_homepage(&self) -> Result<String, RequestFailure> {
        let url = self.homepage_url();
        let response = self.get(&url).await?;
        response.text().await.map_err(|source| {
            log::error!("failed to read homepage from {url}: {source}");
            RequestFailure { url, source }
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RequestFailure> {
        match self
            .http
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
        {
            Ok(response) => Ok(response),
            Err(source) => {
                log::error!("request to {url} failed: {source}");
                Err(RequestFailure {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
