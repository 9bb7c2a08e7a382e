use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::proxy::{Proxy, ProxyProtocol};
use crate::source::ProxySource;

/// Pool of proxies from all sources, handed out round-robin.
///
/// The list is shuffled on every refresh so load spreads across entries.
pub struct ProxyProvider {
    sources: Vec<Arc<dyn ProxySource>>,
    proxies: RwLock<Arc<Vec<Proxy>>>,
    cursor: AtomicUsize,
}

impl ProxyProvider {
    pub fn new(sources: Vec<Arc<dyn ProxySource>>) -> Self {
        Self {
            sources,
            proxies: RwLock::new(Arc::new(Vec::new())),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Refreshes every source, then rebuilds and shuffles the pool.
    #[instrument(skip(self))]
    pub async fn refresh_all(&self) {
        info!(sources = self.sources.len(), "Refreshing proxy sources");

        for source in &self.sources {
            source.refresh().await;
        }

        let mut combined = Vec::new();
        for source in &self.sources {
            combined.extend(source.proxies().await.iter().cloned());
        }
        combined.shuffle(&mut rand::thread_rng());

        let socks5 = combined
            .iter()
            .filter(|p| p.protocol == ProxyProtocol::Socks5)
            .count();
        info!(
            total = combined.len(),
            socks5 = socks5,
            socks4 = combined.len() - socks5,
            "Proxy pool rebuilt"
        );

        *self.proxies.write().await = Arc::new(combined);
        self.cursor.store(0, Ordering::Relaxed);
    }

    /// Snapshot of the current pool.
    pub async fn proxies(&self) -> Arc<Vec<Proxy>> {
        self.proxies.read().await.clone()
    }

    pub async fn proxy_count(&self) -> usize {
        self.proxies.read().await.len()
    }

    /// Next proxy of any protocol; `None` when the pool is empty.
    pub async fn next_proxy(&self) -> Option<Proxy> {
        let list = self.proxies().await;
        self.pick(&list)
    }

    /// Next socks5 proxy; falls back to any protocol when there is no socks5 entry.
    pub async fn next_socks5_proxy(&self) -> Option<Proxy> {
        let list = self.proxies().await;
        let socks5: Vec<Proxy> = list
            .iter()
            .filter(|p| p.protocol == ProxyProtocol::Socks5)
            .cloned()
            .collect();
        if socks5.is_empty() {
            if !list.is_empty() {
                warn!("No socks5 proxies, using any available");
            }
            return self.pick(&list);
        }
        self.pick(&socks5)
    }

    /// Next proxy formatted for `yt-dlp --proxy`.
    pub async fn current_proxy(&self) -> Option<String> {
        let proxy = self.next_socks5_proxy().await?.to_ytdlp_format();
        debug!(proxy = %proxy, "Proxy handed out");
        Some(proxy)
    }

    /// Refreshes the pool every `period` until the returned task is aborted.
    /// The first refresh happens after one full period.
    pub fn spawn_refresh_loop(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.refresh_all().await;
            }
        })
    }

    fn pick(&self, list: &[Proxy]) -> Option<Proxy> {
        if list.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % list.len();
        list.get(index).cloned()
    }
}
