//! Bot abstraction for sending, editing and deleting messages and uploading videos.
//!
//! [`Bot`] is transport-agnostic; dlbot-telegram implements it via teloxide.

use crate::error::{DbotError, Result};
use crate::types::Chat;
use async_trait::async_trait;
use std::path::Path;
use tracing::warn;

/// Abstraction for talking to a chat transport (e.g. Telegram).
///
/// `message_id` arguments are transport-specific strings (Telegram: numeric).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Edits an already-sent text message.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a message and returns its id (for a later `edit_message`).
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Deletes a message from the chat.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Uploads a local video file with a caption; returns the id of the sent message.
    async fn send_video(&self, chat: &Chat, path: &Path, caption: &str) -> Result<String>;

    /// Edits the message; if editing fails, sends `text` as a new message instead.
    async fn edit_or_send_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        match self.edit_message(chat, message_id, text).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(chat_id = chat.id, message_id = %message_id, error = %e, "Edit failed, sending new message");
                self.send_message(chat, text).await
            }
        }
    }
}

/// Parses a message id string into an i32. Used by edit/delete.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records sent texts; edit always fails.
    struct FailingEditBot {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Bot for FailingEditBot {
        async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
        async fn edit_message(&self, _chat: &Chat, _message_id: &str, _text: &str) -> Result<()> {
            Err(DbotError::Bot("message to edit not found".to_string()))
        }
        async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
            self.send_message(chat, text).await?;
            Ok("1".to_string())
        }
        async fn delete_message(&self, _chat: &Chat, _message_id: &str) -> Result<()> {
            Ok(())
        }
        async fn send_video(&self, _chat: &Chat, _path: &Path, _caption: &str) -> Result<String> {
            Ok("2".to_string())
        }
    }

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    /// **Test: edit_or_send_message falls back to send_message when edit fails.**
    #[tokio::test]
    async fn test_edit_or_send_falls_back_to_send() {
        let bot = FailingEditBot {
            sent: Mutex::new(Vec::new()),
        };
        let chat = Chat {
            id: 1,
            chat_type: "private".to_string(),
        };

        bot.edit_or_send_message(&chat, "42", "fallback text")
            .await
            .unwrap();

        assert_eq!(*bot.sent.lock().unwrap(), vec!["fallback text".to_string()]);
    }
}
