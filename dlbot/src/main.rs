//! dlbot CLI: run the bot, inspect formats for a URL, check the proxy sources.

use anyhow::Result;
use clap::Parser;
use dlbot::cli::{handle_formats, handle_proxies};
use dlbot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Formats { url, json } => handle_formats(&url, json).await,
        Commands::Proxies => handle_proxies().await,
    }
}
