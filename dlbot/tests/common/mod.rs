//! Shared helpers: a recording [`dlbot_core::Bot`] and config builders that do not touch env.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use dlbot::{BaseConfig, BotConfig, DownloadConfig, ProxyConfig};
use dlbot_core::{Bot, Chat, Result};

/// Records every outgoing call as a short string, e.g. `status:Processing started`.
#[derive(Default)]
pub struct RecordingBot {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingBot {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.record(format!("send:{}", text));
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(format!("edit:{}:{}", message_id, text));
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.record(format!("status:{}", text));
        Ok("900".to_string())
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.record(format!("delete:{}", message_id));
        Ok(())
    }

    async fn send_video(&self, _chat: &Chat, path: &Path, caption: &str) -> Result<String> {
        self.record(format!(
            "video:{}:{}",
            path.file_name().unwrap().to_string_lossy(),
            caption
        ));
        Ok("901".to_string())
    }
}

pub fn test_config(download_path: PathBuf, allowed: &[&str]) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "123456:test".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            health_addr: None,
        },
        download: DownloadConfig {
            allowed_users: allowed.iter().map(|s| s.to_string()).collect(),
            max_message_length: 400,
            download_path,
            max_file_size_mb: 50.0,
            ytdlp_path: "yt-dlp".to_string(),
            ytdlp_timeout_secs: 10,
        },
        proxy: ProxyConfig {
            enabled: false,
            scrape_enabled: false,
            scrape_url: "https://proxies.invalid/list".to_string(),
            files: Vec::new(),
            refresh_secs: 300,
        },
    }
}
