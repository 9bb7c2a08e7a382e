//! Per-site download strategies used by [`crate::VideoMessageHandler`].

mod instagram;
mod vk;
mod youtube;

use std::path::PathBuf;

use async_trait::async_trait;
use dlbot_core::Message;
use ytdlp::{file_name_for, YtDlp};

use crate::error::DownloadError;

pub use instagram::InstagramStrategy;
pub use vk::VkStrategy;
pub use youtube::YouTubeStrategy;

/// Where a download comes from; names the temporary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadContext {
    pub chat_id: i64,
    pub message_id: String,
    pub username: Option<String>,
}

impl DownloadContext {
    pub fn from_message(message: &Message) -> Self {
        Self {
            chat_id: message.chat.id,
            message_id: message.id.clone(),
            username: message.user.username.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        file_name_for(self.chat_id, &self.message_id, self.username.as_deref())
    }
}

#[async_trait]
pub trait DownloadStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether the message text belongs to this site.
    fn can_handle(&self, text: &str) -> bool;

    /// Downloads the video behind `url`; returns the local file path.
    async fn download(&self, url: &str, ctx: &DownloadContext) -> Result<PathBuf, DownloadError>;
}

/// Fails with [`DownloadError::FileSizeExceeded`] when `size_mb` is over the limit.
pub(crate) fn check_file_size(ytdlp: &YtDlp, size_mb: f64) -> Result<(), DownloadError> {
    if ytdlp.is_file_size_exceeded(size_mb) {
        return Err(DownloadError::FileSizeExceeded {
            size_mb,
            max_mb: ytdlp.max_file_size_mb(),
        });
    }
    Ok(())
}
