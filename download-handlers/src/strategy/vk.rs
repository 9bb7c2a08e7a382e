use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ytdlp::YtDlp;

use super::youtube::download_best_format;
use super::{DownloadContext, DownloadStrategy};
use crate::error::DownloadError;

const VK_HOSTS: [&str; 2] = ["vk.com", "vk.ru"];

/// VK video links; downloaded the same way as YouTube.
pub struct VkStrategy {
    ytdlp: Arc<YtDlp>,
}

impl VkStrategy {
    pub fn new(ytdlp: Arc<YtDlp>) -> Self {
        Self { ytdlp }
    }
}

#[async_trait]
impl DownloadStrategy for VkStrategy {
    fn name(&self) -> &'static str {
        "vk"
    }

    /// Any mention of a VK host, at the start (`https://www.vk.com/...`) or inside the text.
    fn can_handle(&self, text: &str) -> bool {
        VK_HOSTS.iter().any(|host| text.contains(host))
    }

    async fn download(&self, url: &str, ctx: &DownloadContext) -> Result<PathBuf, DownloadError> {
        download_best_format(&self.ytdlp, url, ctx).await
    }
}
