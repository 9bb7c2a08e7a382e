//! BotConfig: BaseConfig + DownloadConfig + ProxyConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, DownloadConfig, ProxyConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub download: DownloadConfig,
    pub proxy: ProxyConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            download: DownloadConfig::from_env()?,
            proxy: ProxyConfig::from_env()?,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.download.validate()?;
        self.proxy.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn download(&self) -> &DownloadConfig {
        &self.download
    }
    pub fn proxy(&self) -> &ProxyConfig {
        &self.proxy
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn health_addr(&self) -> Option<&str> {
        self.base.health_addr.as_deref()
    }
    pub fn allowed_users(&self) -> &[String] {
        &self.download.allowed_users
    }
}
