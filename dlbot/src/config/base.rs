//! Base config: Telegram connection, logging and the health server. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// HEALTH_ADDR; None disables the health server
    pub health_addr: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/dlbot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let health_addr = match env::var("HEALTH_ADDR") {
            Ok(addr) if addr.trim().is_empty() => None,
            Ok(addr) => Some(addr.trim().to_string()),
            Err(_) => Some("0.0.0.0:8080".to_string()),
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            health_addr,
        })
    }

    /// Validate config: non-empty token, telegram_api_url a valid URL, health_addr a socket address.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref addr) = self.health_addr {
            addr.parse::<SocketAddr>()
                .with_context(|| format!("HEALTH_ADDR is not a valid socket address: {}", addr))?;
        }
        Ok(())
    }
}
