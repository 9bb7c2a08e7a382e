use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::ProxySource;
use crate::proxy::{Proxy, ProxyProtocol};

static IP_PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}):(\d{1,5})$").expect("ip:port pattern is valid")
});

/// Proxies from a text file with one `ip:port` per line. Every entry gets the same protocol.
/// Blank lines and `#` comments are skipped, malformed lines ignored.
pub struct LocalFileSource {
    path: PathBuf,
    protocol: ProxyProtocol,
    name: String,
    proxies: RwLock<Arc<Vec<Proxy>>>,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>, protocol: ProxyProtocol) -> Self {
        let path = path.into();
        let name = format!("LocalFile[{}]", path.display());
        Self {
            path,
            protocol,
            name,
            proxies: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Parses file contents; exposed for tests and the CLI.
    pub fn parse(contents: &str, protocol: ProxyProtocol) -> Vec<Proxy> {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let caps = IP_PORT_RE.captures(line)?;
                let port = caps.get(2)?.as_str().parse::<u16>().ok()?;
                Some(Proxy::new(caps.get(1)?.as_str(), port, protocol))
            })
            .collect()
    }
}

#[async_trait]
impl ProxySource for LocalFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn proxies(&self) -> Arc<Vec<Proxy>> {
        self.proxies.read().await.clone()
    }

    async fn refresh(&self) {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                error!(source = %self.name, error = %e, "Failed to read proxy file");
                return;
            }
        };

        let loaded = Self::parse(&contents, self.protocol);
        if loaded.is_empty() {
            warn!(source = %self.name, "Proxy file is empty or has no valid entries");
            return;
        }
        info!(source = %self.name, count = loaded.len(), "Loaded proxies from file");
        *self.proxies.write().await = Arc::new(loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_garbage() {
        let contents = "# free list\n\n1.2.3.4:1080\n  5.6.7.8:4145  \nnot-a-proxy\n9.9.9.9:99999\n10.0.0.1\n";
        let proxies = LocalFileSource::parse(contents, ProxyProtocol::Socks4);

        assert_eq!(
            proxies,
            vec![
                Proxy::new("1.2.3.4", 1080, ProxyProtocol::Socks4),
                Proxy::new("5.6.7.8", 4145, ProxyProtocol::Socks4),
            ]
        );
    }

    /// **Test: refresh loads the file; a later refresh of an emptied file keeps the old list.**
    #[tokio::test]
    async fn test_refresh_keeps_previous_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxies.txt");
        std::fs::write(&path, "1.2.3.4:1080\n").unwrap();

        let source = LocalFileSource::new(&path, ProxyProtocol::Socks5);
        assert!(!source.is_available().await);

        source.refresh().await;
        assert_eq!(source.proxies().await.len(), 1);

        std::fs::write(&path, "# nothing left\n").unwrap();
        source.refresh().await;
        assert_eq!(source.proxies().await.len(), 1);

        std::fs::remove_file(&path).unwrap();
        source.refresh().await;
        assert!(source.is_available().await);
        assert!(source.name().starts_with("LocalFile["));
    }
}
