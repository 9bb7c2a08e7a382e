//! Proxy sources. Each source keeps its last good list; [`ProxySource::refresh`] never fails,
//! it logs and keeps the previous list instead.

mod local_file;
mod proxy_scrape;

use async_trait::async_trait;
use std::sync::Arc;

use crate::proxy::Proxy;

pub use local_file::LocalFileSource;
pub use proxy_scrape::{ProxyScrapeClient, ProxyScrapeSource, PROXY_SCRAPE_URL};

#[async_trait]
pub trait ProxySource: Send + Sync {
    /// Human-readable name for logs (e.g. `ProxyScrape`, `LocalFile[proxies.txt]`).
    fn name(&self) -> &str;

    /// Current list of this source.
    async fn proxies(&self) -> Arc<Vec<Proxy>>;

    /// Reloads the list; on error or an empty result the previous list stays.
    async fn refresh(&self);

    async fn is_available(&self) -> bool {
        !self.proxies().await.is_empty()
    }
}
