//! Bot entry point: logging, validation, components, proxy refresh, health server, long polling.

use anyhow::{Context, Result};
use dlbot_core::init_tracing;
use dlbot_telegram::run_polling;
use tracing::{info, instrument, warn};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::health::{spawn_health_server, HealthState};

/// Main entry: init logging, validate config, build components, start background tasks, then poll.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    config.validate()?;

    info!(
        allowed_users = config.allowed_users().len(),
        download_path = %config.download().download_path.display(),
        max_file_size_mb = config.download().max_file_size_mb,
        proxy_enabled = config.proxy().enabled,
        "Initializing bot"
    );
    if config.allowed_users().is_empty() {
        warn!("ALLOWED_USERS is empty, every message will be rejected");
    }

    tokio::fs::create_dir_all(&config.download().download_path)
        .await
        .with_context(|| {
            format!(
                "Failed to create download directory {}",
                config.download().download_path.display()
            )
        })?;

    let components = build_bot_components(&config)?;

    let _refresh_task = match &components.proxies {
        Some(pool) => {
            pool.refresh_all().await;
            info!(proxies = pool.proxy_count().await, "Initial proxy refresh done");
            Some(pool.clone().spawn_refresh_loop(config.proxy().refresh_interval()))
        }
        None => None,
    };

    let _health_task = match config.health_addr() {
        Some(addr) => Some(
            spawn_health_server(
                addr,
                HealthState {
                    proxies: components.proxies.clone(),
                },
            )
            .await?,
        ),
        None => None,
    };

    let handler_chain = build_handler_chain(&components, &config);
    info!(handlers = handler_chain.len(), "step: handler chain built, starting polling");

    run_polling(components.teloxide_bot.clone(), handler_chain).await
}
