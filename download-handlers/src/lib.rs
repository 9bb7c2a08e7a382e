//! # Download handlers
//!
//! Handlers for the download bot chain: [`LoggingHandler`], [`AuthHandler`] (username allowlist),
//! [`MessageFilterHandler`] (text-only, length limit) and [`VideoMessageHandler`], which runs one
//! [`DownloadStrategy`] per site (YouTube, Instagram, VK) and posts the video back to the chat.

mod error;
mod filter;
mod logging_auth;
pub mod strategy;
mod video_handler;

pub use error::DownloadError;
pub use filter::{MessageFilterHandler, DEFAULT_MAX_MESSAGE_LENGTH};
pub use logging_auth::{AuthHandler, LoggingHandler};
pub use strategy::{
    DownloadContext, DownloadStrategy, InstagramStrategy, VkStrategy, YouTubeStrategy,
};
pub use video_handler::{
    error_text, VideoMessageHandler, MSG_DOWNLOAD_FAILED, MSG_PROCESSING_STARTED,
    MSG_SEND_INTERRUPTED, MSG_TECHNICAL_FAILURE,
};
