use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtDlpError {
    #[error("yt-dlp executable not found: {0}")]
    NotFound(String),

    #[error("Failed to start yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("yt-dlp exited with code {code:?}")]
    Exit { code: Option<i32>, log: String },

    #[error("yt-dlp timed out after {0} s")]
    Timeout(u64),

    #[error("Downloaded file is missing: {0}")]
    MissingOutput(String),

    #[error("yt-dlp reported no file size")]
    NoSizeInfo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, YtDlpError>;
