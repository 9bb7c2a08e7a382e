use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use proxy_pool::ProxyProvider;
use tracing::{info, instrument};
use ytdlp::{DownloadCommand, YtDlp};

use super::{check_file_size, DownloadContext, DownloadStrategy};
use crate::error::DownloadError;

/// Instagram links. Downloads the merged mp4 through the proxy pool when one is configured.
pub struct InstagramStrategy {
    ytdlp: Arc<YtDlp>,
    proxies: Option<Arc<ProxyProvider>>,
}

impl InstagramStrategy {
    pub fn new(ytdlp: Arc<YtDlp>, proxies: Option<Arc<ProxyProvider>>) -> Self {
        Self { ytdlp, proxies }
    }

    /// Instagram lists video and audio streams whose sizes add up to about twice the merged file;
    /// half the largest listed size, rounded down to 0.01 MB, is the estimate.
    pub fn estimate_size_mb(listed_max_mb: f64) -> f64 {
        (listed_max_mb / 2.0 * 100.0).floor() / 100.0
    }
}

#[async_trait]
impl DownloadStrategy for InstagramStrategy {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.to_lowercase().contains("instagram.com")
    }

    #[instrument(skip(self, ctx), fields(chat_id = ctx.chat_id))]
    async fn download(&self, url: &str, ctx: &DownloadContext) -> Result<PathBuf, DownloadError> {
        let listed = self.ytdlp.max_video_size(url).await?;
        let estimate = Self::estimate_size_mb(listed);
        check_file_size(&self.ytdlp, estimate)?;

        let proxy = match &self.proxies {
            Some(pool) => pool.current_proxy().await,
            None => None,
        };
        info!(estimate_mb = estimate, proxy = ?proxy, "Downloading Instagram video");

        let command = DownloadCommand::new(url, self.ytdlp.download_dir(), ctx.file_name())
            .preset("mp4")
            .proxy(proxy);
        Ok(self.ytdlp.download(&command).await?)
    }
}
