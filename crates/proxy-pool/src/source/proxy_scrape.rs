//! Free proxy list from the ProxyScrape API. Only live socks4/socks5 entries are kept.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use super::ProxySource;
use crate::error::{ProxyError, Result};
use crate::proxy::{Proxy, ProxyProtocol};

pub const PROXY_SCRAPE_URL: &str = "https://api.proxyscrape.com/v4/free-proxy-list/get?request=display_proxies&proxy_format=ipport&format=json";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    proxies: Vec<ScrapeProxy>,
}

#[derive(Debug, Deserialize)]
struct ScrapeProxy {
    ip: Option<String>,
    port: Option<u32>,
    protocol: Option<String>,
    alive: Option<bool>,
    ip_data: Option<serde_json::Value>,
}

impl ScrapeProxy {
    fn into_proxy(self) -> Option<Proxy> {
        if self.alive == Some(false) {
            return None;
        }
        let protocol: ProxyProtocol = self.protocol?.parse().ok()?;
        let country_code = self
            .ip_data
            .as_ref()
            .and_then(|d| d.get("countryCode"))
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string();
        let port = u16::try_from(self.port?).ok()?;
        Some(Proxy::new(self.ip?, port, protocol).with_country_code(country_code))
    }
}

/// HTTP client for the ProxyScrape list endpoint.
#[derive(Clone)]
pub struct ProxyScrapeClient {
    http: reqwest::Client,
    url: String,
}

impl ProxyScrapeClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads and parses the list. Non-200 responses are errors.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_proxies(&self) -> Result<Vec<Proxy>> {
        let response = self
            .http
            .get(&self.url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProxyError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    /// Parses the JSON body. A missing `proxies` field yields an empty list.
    pub fn parse_response(body: &str) -> Result<Vec<Proxy>> {
        let parsed: ScrapeResponse = serde_json::from_str(body)?;
        let proxies: Vec<Proxy> = parsed
            .proxies
            .into_iter()
            .filter_map(ScrapeProxy::into_proxy)
            .collect();
        info!(count = proxies.len(), "Parsed socks proxies from ProxyScrape");
        Ok(proxies)
    }
}

/// [`ProxySource`] backed by [`ProxyScrapeClient`].
pub struct ProxyScrapeSource {
    client: ProxyScrapeClient,
    proxies: RwLock<Arc<Vec<Proxy>>>,
}

impl ProxyScrapeSource {
    pub fn new(client: ProxyScrapeClient) -> Self {
        Self {
            client,
            proxies: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ProxySource for ProxyScrapeSource {
    fn name(&self) -> &str {
        "ProxyScrape"
    }

    async fn proxies(&self) -> Arc<Vec<Proxy>> {
        self.proxies.read().await.clone()
    }

    async fn refresh(&self) {
        match self.client.fetch_proxies().await {
            Ok(fetched) if fetched.is_empty() => {
                warn!(source = self.name(), "API returned an empty list, keeping the previous one");
            }
            Ok(fetched) => {
                let socks5 = fetched
                    .iter()
                    .filter(|p| p.protocol == ProxyProtocol::Socks5)
                    .count();
                info!(
                    source = self.name(),
                    count = fetched.len(),
                    socks5 = socks5,
                    socks4 = fetched.len() - socks5,
                    "Loaded proxies"
                );
                *self.proxies.write().await = Arc::new(fetched);
            }
            Err(e) => {
                error!(source = self.name(), error = %e, "Failed to refresh proxies");
            }
        }
    }
}
