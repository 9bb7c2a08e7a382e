//! Proxy pool config: which sources feed the pool and how often it is refreshed.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use proxy_pool::source::PROXY_SCRAPE_URL;
use proxy_pool::ProxyProtocol;

use super::{env_parse, split_list};

/// One PROXY_FILES entry: a local `ip:port` list and the protocol of its proxies.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyFile {
    pub path: PathBuf,
    pub protocol: ProxyProtocol,
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// PROXY_ENABLED
    pub enabled: bool,
    /// PROXY_SCRAPE_ENABLED
    pub scrape_enabled: bool,
    /// PROXY_SCRAPE_URL
    pub scrape_url: String,
    /// PROXY_FILES (`path=protocol;...`)
    pub files: Vec<ProxyFile>,
    /// PROXY_REFRESH_SECS
    pub refresh_secs: u64,
}

/// Parses `path=protocol;path=protocol`.
fn parse_proxy_files(raw: &str) -> Result<Vec<ProxyFile>> {
    split_list(raw)
        .into_iter()
        .map(|entry| {
            let (path, protocol) = entry
                .rsplit_once('=')
                .with_context(|| format!("PROXY_FILES entry must be path=protocol: {}", entry))?;
            let protocol = protocol
                .parse::<ProxyProtocol>()
                .with_context(|| format!("PROXY_FILES entry has an unknown protocol: {}", entry))?;
            Ok(ProxyFile {
                path: PathBuf::from(path.trim()),
                protocol,
            })
        })
        .collect()
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        let scrape_url = env::var("PROXY_SCRAPE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| PROXY_SCRAPE_URL.to_string());

        Ok(Self {
            enabled: env_parse("PROXY_ENABLED", false)?,
            scrape_enabled: env_parse("PROXY_SCRAPE_ENABLED", true)?,
            scrape_url,
            files: parse_proxy_files(&env::var("PROXY_FILES").unwrap_or_default())?,
            refresh_secs: env_parse("PROXY_REFRESH_SECS", 300)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if reqwest::Url::parse(&self.scrape_url).is_err() {
            anyhow::bail!("PROXY_SCRAPE_URL is not a valid URL: {}", self.scrape_url);
        }
        if self.refresh_secs == 0 {
            anyhow::bail!("PROXY_REFRESH_SECS must be positive");
        }
        if !self.scrape_enabled && self.files.is_empty() {
            anyhow::bail!("PROXY_ENABLED is set but no proxy source is configured");
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
