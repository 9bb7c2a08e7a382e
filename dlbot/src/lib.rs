//! # dlbot
//!
//! Telegram bot that downloads videos from YouTube, Instagram and VK with yt-dlp and posts them
//! back into the chat. Loads config from env, wires the handler chain and runs long polling.

pub mod cli;
pub mod components;
pub mod config;
pub mod health;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{
    build_bot_components, build_handler_chain, build_proxy_provider, build_proxy_sources,
    BotComponents,
};
pub use config::{BaseConfig, BotConfig, DownloadConfig, ProxyConfig, ProxyFile};
pub use health::{create_router, spawn_health_server, HealthState};
pub use runner::run_bot;
