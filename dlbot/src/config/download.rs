//! Download config: who may use the bot, message/file limits and the yt-dlp executable.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use download_handlers::DEFAULT_MAX_MESSAGE_LENGTH;
use ytdlp::YtDlpSettings;

use super::{env_parse, split_list};

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// ALLOWED_USERS (`;`-separated usernames)
    pub allowed_users: Vec<String>,
    /// MAX_MESSAGE_LENGTH
    pub max_message_length: usize,
    /// DOWNLOAD_PATH
    pub download_path: PathBuf,
    /// MAX_FILE_SIZE_MB
    pub max_file_size_mb: f64,
    /// YTDLP_PATH
    pub ytdlp_path: String,
    /// YTDLP_TIMEOUT_SECS
    pub ytdlp_timeout_secs: u64,
}

impl DownloadConfig {
    pub fn from_env() -> Result<Self> {
        let allowed_users = split_list(&env::var("ALLOWED_USERS").unwrap_or_default());
        let download_path = env::var("DOWNLOAD_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "/tmp/".to_string());
        let ytdlp_path = env::var("YTDLP_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "yt-dlp".to_string());

        Ok(Self {
            allowed_users,
            max_message_length: env_parse("MAX_MESSAGE_LENGTH", DEFAULT_MAX_MESSAGE_LENGTH)?,
            download_path: PathBuf::from(download_path),
            max_file_size_mb: env_parse("MAX_FILE_SIZE_MB", 50.0)?,
            ytdlp_path,
            ytdlp_timeout_secs: env_parse("YTDLP_TIMEOUT_SECS", 600)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_file_size_mb.is_nan() || self.max_file_size_mb <= 0.0 {
            anyhow::bail!("MAX_FILE_SIZE_MB must be positive, got {}", self.max_file_size_mb);
        }
        if self.ytdlp_timeout_secs == 0 {
            anyhow::bail!("YTDLP_TIMEOUT_SECS must be positive");
        }
        Ok(())
    }

    pub fn ytdlp_settings(&self) -> YtDlpSettings {
        YtDlpSettings {
            program: self.ytdlp_path.clone(),
            extra_args: Vec::new(),
            download_dir: self.download_path.clone(),
            max_file_size_mb: self.max_file_size_mb,
            timeout: Duration::from_secs(self.ytdlp_timeout_secs),
        }
    }
}
