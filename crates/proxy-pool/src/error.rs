use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Proxy list request failed with status {0}")]
    Status(u16),

    #[error("Invalid proxy list JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown proxy protocol: {0}")]
    UnknownProtocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
