//! CLI parser and the one-shot commands (`formats`, `proxies`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proxy_pool::{ProxyProtocol, ProxyProvider};
use ytdlp::{select_best_format, YtDlp};

use crate::components::build_proxy_sources;
use crate::config::{BotConfig, DownloadConfig, ProxyConfig};

#[derive(Parser)]
#[command(name = "dlbot")]
#[command(about = "Telegram video download bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// List the formats yt-dlp reports for a URL and show the one the bot would pick.
    Formats {
        url: String,
        /// Print formats as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Refresh the configured proxy sources once and print what they returned.
    Proxies,
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Console-only tracing for one-shot commands.
fn init_console_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .try_init();
}

pub async fn handle_formats(url: &str, json: bool) -> Result<()> {
    init_console_tracing();
    let config = DownloadConfig::from_env()?;
    config.validate()?;
    let ytdlp = YtDlp::new(config.ytdlp_settings());

    let formats = ytdlp
        .list_formats(url)
        .await
        .with_context(|| format!("yt-dlp failed for {}", url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&formats)?);
        return Ok(());
    }

    if formats.is_empty() {
        println!("No formats found");
        return Ok(());
    }
    for f in &formats {
        println!("{:<8} {:<6} {:<12} {:>9.2} MB", f.id, f.container, f.resolution, f.size_mb);
    }
    match select_best_format(&formats) {
        Some(best) => {
            let verdict = if ytdlp.is_file_size_exceeded(best.size_mb) {
                "over the size limit"
            } else {
                "ok"
            };
            println!("Selected: {} ({:.2} MB, {})", best.id, best.size_mb, verdict);
        }
        None => println!("No suitable format (mp4, 240p-360p)"),
    }
    Ok(())
}

pub async fn handle_proxies() -> Result<()> {
    init_console_tracing();
    let config = ProxyConfig::from_env()?;
    let sources = build_proxy_sources(&config)?;
    if sources.is_empty() {
        println!("No proxy sources configured");
        return Ok(());
    }

    let pool = ProxyProvider::new(sources.clone());
    pool.refresh_all().await;
    for source in &sources {
        if source.is_available().await {
            println!("{}: {} proxies", source.name(), source.proxies().await.len());
        } else {
            println!("{}: unavailable", source.name());
        }
    }

    let proxies = pool.proxies().await;
    let socks5 = proxies
        .iter()
        .filter(|p| p.protocol == ProxyProtocol::Socks5)
        .count();
    println!(
        "Total: {} (socks5: {}, socks4: {})",
        proxies.len(),
        socks5,
        proxies.len() - socks5
    );
    if let Some(proxy) = pool.current_proxy().await {
        println!("Next: {}", proxy);
    }
    Ok(())
}
