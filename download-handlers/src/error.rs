use thiserror::Error;
use ytdlp::YtDlpError;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("No formats available")]
    NoFormats,

    #[error("No suitable format (mp4, 240p-360p)")]
    NoSuitableFormat,

    #[error("File size ({size_mb:.2} MB) exceeds the maximum allowed ({max_mb:.2} MB).")]
    FileSizeExceeded { size_mb: f64, max_mb: f64 },

    #[error(transparent)]
    YtDlp(#[from] YtDlpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
