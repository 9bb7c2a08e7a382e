//! Chain handler that downloads a linked video with a [`DownloadStrategy`] and posts it back.

use std::sync::Arc;

use async_trait::async_trait;
use dlbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{error, info, instrument, warn};
use ytdlp::{extract_url, YtDlp, YtDlpError};

use crate::error::DownloadError;
use crate::strategy::{DownloadContext, DownloadStrategy};

pub const MSG_PROCESSING_STARTED: &str = "Processing started";
pub const MSG_DOWNLOAD_FAILED: &str = "Failed to download the video";
pub const MSG_SEND_INTERRUPTED: &str = "The download process was interrupted";
pub const MSG_TECHNICAL_FAILURE: &str =
    "Could not download the file for technical reasons =(\nPlease contact the admin";

/// User-facing text for a failed download.
pub fn error_text(err: &DownloadError) -> String {
    match err {
        DownloadError::NoFormats | DownloadError::NoSuitableFormat => MSG_DOWNLOAD_FAILED.to_string(),
        DownloadError::YtDlp(YtDlpError::Exit { .. }) => MSG_TECHNICAL_FAILURE.to_string(),
        DownloadError::FileSizeExceeded { .. } => err.to_string(),
        other => format!("The process was interrupted: {}", other),
    }
}

/// Removes every occurrence of `url` from `text` and trims the rest.
fn text_without_url(text: &str, url: &str) -> String {
    text.replace(url, "").trim().to_string()
}

/// Handles messages its strategy recognizes; everything else passes through with Continue.
pub struct VideoMessageHandler<S: DownloadStrategy> {
    strategy: S,
    bot: Arc<dyn Bot>,
    ytdlp: Arc<YtDlp>,
}

impl<S: DownloadStrategy> VideoMessageHandler<S> {
    pub fn new(strategy: S, bot: Arc<dyn Bot>, ytdlp: Arc<YtDlp>) -> Self {
        Self {
            strategy,
            bot,
            ytdlp,
        }
    }

    async fn report_error(&self, message: &Message, status_id: Option<&str>, text: &str) {
        let sent = match status_id {
            Some(id) => self.bot.edit_or_send_message(&message.chat, id, text).await,
            None => self.bot.send_message(&message.chat, text).await,
        };
        if let Err(e) = sent {
            error!(chat_id = message.chat.id, error = %e, "Failed to report download error");
        }
    }

    async fn process(&self, message: &Message) {
        let text = message.content.as_str();
        let url = extract_url(text).unwrap_or(text).trim();
        let caption_text = text_without_url(text, url);

        let status_id = match self
            .bot
            .send_message_and_return_id(&message.chat, MSG_PROCESSING_STARTED)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(chat_id = message.chat.id, error = %e, "Failed to send status message");
                None
            }
        };

        let ctx = DownloadContext::from_message(message);
        let path = match self.strategy.download(url, &ctx).await {
            Ok(path) => path,
            Err(e) => {
                error!(strategy = self.strategy.name(), url = %url, error = %e, "Download failed");
                self.report_error(message, status_id.as_deref(), &error_text(&e)).await;
                return;
            }
        };

        match self.bot.send_video(&message.chat, &path, url).await {
            Ok(video_id) => {
                info!(
                    strategy = self.strategy.name(),
                    chat_id = message.chat.id,
                    video_message_id = %video_id,
                    "Video sent"
                );
                let summary = format!("@{}: {}", message.username_or_unknown(), caption_text);
                match status_id.as_deref() {
                    Some(id) => {
                        if let Err(e) = self.bot.edit_or_send_message(&message.chat, id, &summary).await {
                            warn!(chat_id = message.chat.id, error = %e, "Failed to update status message");
                        }
                    }
                    None => {
                        if let Err(e) = self.bot.send_message(&message.chat, &summary).await {
                            warn!(chat_id = message.chat.id, error = %e, "Failed to send summary");
                        }
                    }
                }
                if let Err(e) = self.bot.delete_message(&message.chat, &message.id).await {
                    warn!(chat_id = message.chat.id, message_id = %message.id, error = %e, "Failed to delete original message");
                }
            }
            Err(e) => {
                error!(chat_id = message.chat.id, error = %e, "Failed to send video");
                self.report_error(message, status_id.as_deref(), MSG_SEND_INTERRUPTED).await;
            }
        }

        self.ytdlp.delete_file(&path).await;
    }
}

#[async_trait]
impl<S: DownloadStrategy> Handler for VideoMessageHandler<S> {
    #[instrument(skip(self, message), fields(strategy = self.strategy.name(), chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.strategy.can_handle(&message.content) {
            return Ok(HandlerResponse::Continue);
        }
        info!(username = %message.username_or_unknown(), "Download requested");
        self.process(message).await;
        Ok(HandlerResponse::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_without_url() {
        assert_eq!(
            text_without_url("look at this https://youtu.be/abc", "https://youtu.be/abc"),
            "look at this"
        );
        assert_eq!(text_without_url("https://youtu.be/abc", "https://youtu.be/abc"), "");
        assert_eq!(
            text_without_url(
                "https://youtu.be/abc again https://youtu.be/abc",
                "https://youtu.be/abc"
            ),
            "again"
        );
    }

    #[test]
    fn test_error_text_mapping() {
        assert_eq!(error_text(&DownloadError::NoFormats), MSG_DOWNLOAD_FAILED);
        assert_eq!(error_text(&DownloadError::NoSuitableFormat), MSG_DOWNLOAD_FAILED);
        assert_eq!(
            error_text(&DownloadError::YtDlp(YtDlpError::Exit {
                code: Some(1),
                log: "ERROR".into()
            })),
            MSG_TECHNICAL_FAILURE
        );
        assert_eq!(
            error_text(&DownloadError::FileSizeExceeded {
                size_mb: 75.5,
                max_mb: 50.0
            }),
            "File size (75.50 MB) exceeds the maximum allowed (50.00 MB)."
        );
        assert!(error_text(&DownloadError::YtDlp(YtDlpError::Timeout(600)))
            .starts_with("The process was interrupted: "));
    }
}
