//! # ytdlp
//!
//! Thin async wrapper around the `yt-dlp` command line tool: finds the first link in a chat message,
//! parses the `yt-dlp -F` format table, picks a small mp4 rendition and runs downloads with a timeout.

mod command;
mod error;
mod format;
mod runner;
mod url;

pub use command::{file_name_for, DownloadCommand};
pub use error::{Result, YtDlpError};
pub use format::{parse_format_line, parse_size_line, select_best_format, VideoFormat};
pub use runner::{YtDlp, YtDlpSettings};
pub use url::extract_url;
