use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,
}

impl DbotError {
    /// True for the error raised by the auth handler; runners log it quietly.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DbotError::Handler(HandlerError::Unauthorized))
    }
}

pub type Result<T> = std::result::Result<T, DbotError>;
