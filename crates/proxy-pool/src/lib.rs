//! # proxy-pool
//!
//! Collects SOCKS proxies from several [`ProxySource`]s and hands them out round-robin,
//! formatted for `yt-dlp --proxy`. The pool is refreshed periodically in the background.

mod error;
mod provider;
mod proxy;
pub mod source;

pub use error::{ProxyError, Result};
pub use provider::ProxyProvider;
pub use proxy::{Proxy, ProxyProtocol};
pub use source::{LocalFileSource, ProxyScrapeClient, ProxyScrapeSource, ProxySource};
