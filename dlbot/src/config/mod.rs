//! Bot configuration from environment variables, split into sections:
//! [`BaseConfig`] (Telegram, log, health server), [`DownloadConfig`] (auth, limits, yt-dlp)
//! and [`ProxyConfig`] (proxy pool sources and refresh).

mod base;
mod bot_config;
mod download;
mod proxy;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use download::DownloadConfig;
pub use proxy::{ProxyConfig, ProxyFile};

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Reads `name`; unset or blank gives `default`, an unparsable value is an error.
pub(crate) fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        _ => Ok(default),
    }
}

/// Splits a `;`-separated list, dropping blank entries.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
