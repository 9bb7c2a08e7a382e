//! Builds the shared components (Telegram bot, yt-dlp runner, proxy pool) and the handler chain.

use std::sync::Arc;

use anyhow::{Context, Result};
use dlbot_core::Bot;
use dlbot_telegram::{build_teloxide_bot, TelegramBotAdapter, TelegramConfig};
use download_handlers::{
    AuthHandler, InstagramStrategy, LoggingHandler, MessageFilterHandler, VideoMessageHandler,
    VkStrategy, YouTubeStrategy,
};
use handler_chain::HandlerChain;
use proxy_pool::{LocalFileSource, ProxyProvider, ProxyScrapeClient, ProxyScrapeSource, ProxySource};
use tracing::{info, instrument};
use ytdlp::YtDlp;

use crate::config::{BotConfig, ProxyConfig};

/// Components shared by the handler chain, the runner and the health server.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub ytdlp: Arc<YtDlp>,
    /// Present when PROXY_ENABLED is set.
    pub proxies: Option<Arc<ProxyProvider>>,
}

/// Every configured proxy source, regardless of PROXY_ENABLED.
pub fn build_proxy_sources(config: &ProxyConfig) -> Result<Vec<Arc<dyn ProxySource>>> {
    let mut sources: Vec<Arc<dyn ProxySource>> = Vec::new();
    if config.scrape_enabled {
        let client = ProxyScrapeClient::new(config.scrape_url.clone())
            .context("Failed to create ProxyScrape client")?;
        sources.push(Arc::new(ProxyScrapeSource::new(client)));
    }
    for file in &config.files {
        sources.push(Arc::new(LocalFileSource::new(file.path.clone(), file.protocol)));
    }
    Ok(sources)
}

/// Proxy pool when enabled; the pool starts empty until the first refresh.
pub fn build_proxy_provider(config: &ProxyConfig) -> Result<Option<Arc<ProxyProvider>>> {
    if !config.enabled {
        return Ok(None);
    }
    let sources = build_proxy_sources(config)?;
    info!(sources = sources.len(), "Proxy pool enabled");
    Ok(Some(Arc::new(ProxyProvider::new(sources))))
}

#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let telegram = TelegramConfig {
        bot_token: config.bot_token().to_string(),
        telegram_api_url: config.telegram_api_url().map(str::to_string),
        log_file: Some(config.log_file().to_string()),
    };
    let teloxide_bot = build_teloxide_bot(&telegram);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let ytdlp = Arc::new(YtDlp::new(config.download().ytdlp_settings()));
    let proxies = build_proxy_provider(config.proxy())?;

    Ok(BotComponents {
        teloxide_bot,
        bot,
        ytdlp,
        proxies,
    })
}

/// Logging → Auth → Filter → YouTube → Instagram → VK.
pub fn build_handler_chain(components: &BotComponents, config: &BotConfig) -> HandlerChain {
    let bot = components.bot.clone();
    let ytdlp = components.ytdlp.clone();

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(config.allowed_users().to_vec())))
        .add_handler(Arc::new(MessageFilterHandler::new(
            config.download().max_message_length,
        )))
        .add_handler(Arc::new(VideoMessageHandler::new(
            YouTubeStrategy::new(ytdlp.clone()),
            bot.clone(),
            ytdlp.clone(),
        )))
        .add_handler(Arc::new(VideoMessageHandler::new(
            InstagramStrategy::new(ytdlp.clone(), components.proxies.clone()),
            bot.clone(),
            ytdlp.clone(),
        )))
        .add_handler(Arc::new(VideoMessageHandler::new(
            VkStrategy::new(ytdlp.clone()),
            bot,
            ytdlp,
        )))
}
