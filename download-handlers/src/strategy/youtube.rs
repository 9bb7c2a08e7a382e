use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};
use ytdlp::{select_best_format, DownloadCommand, YtDlp};

use super::{check_file_size, DownloadContext, DownloadStrategy};
use crate::error::DownloadError;

/// YouTube links (`youtube.com`, `youtu.be`, any case).
pub struct YouTubeStrategy {
    ytdlp: Arc<YtDlp>,
}

impl YouTubeStrategy {
    pub fn new(ytdlp: Arc<YtDlp>) -> Self {
        Self { ytdlp }
    }
}

/// Lists formats, picks the smallest suitable mp4, checks its size and downloads it.
#[instrument(skip(ytdlp, ctx), fields(chat_id = ctx.chat_id))]
pub(crate) async fn download_best_format(
    ytdlp: &YtDlp,
    url: &str,
    ctx: &DownloadContext,
) -> Result<PathBuf, DownloadError> {
    let formats = ytdlp.list_formats(url).await?;
    if formats.is_empty() {
        return Err(DownloadError::NoFormats);
    }
    let best = select_best_format(&formats).ok_or(DownloadError::NoSuitableFormat)?;
    check_file_size(ytdlp, best.size_mb)?;

    info!(
        format_id = %best.id,
        container = %best.container,
        resolution = %best.resolution,
        size_mb = best.size_mb,
        "Selected format"
    );

    let command =
        DownloadCommand::new(url, ytdlp.download_dir(), ctx.file_name()).format_id(best.id.as_str());
    Ok(ytdlp.download(&command).await?)
}

#[async_trait]
impl DownloadStrategy for YouTubeStrategy {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn can_handle(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        text.contains("youtube.com") || text.contains("youtu.be")
    }

    async fn download(&self, url: &str, ctx: &DownloadContext) -> Result<PathBuf, DownloadError> {
        download_best_format(&self.ytdlp, url, ctx).await
    }
}
