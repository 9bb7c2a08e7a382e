use async_trait::async_trait;
use dlbot_core::{Handler, Message, Result};
use tracing::info;

pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 400;

/// Stops the chain for messages that cannot contain a plain link: no text, media attached,
/// or text longer than `max_len` characters.
pub struct MessageFilterHandler {
    max_len: usize,
}

impl MessageFilterHandler {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for MessageFilterHandler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_LENGTH)
    }
}

#[async_trait]
impl Handler for MessageFilterHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.content.trim().is_empty() {
            info!(chat_id = message.chat.id, "Message has no text, ignoring");
            return Ok(false);
        }
        if message.has_media {
            info!(
                chat_id = message.chat.id,
                message_type = %message.message_type,
                "Message carries media, ignoring"
            );
            return Ok(false);
        }
        let len = message.content.chars().count();
        if len > self.max_len {
            info!(chat_id = message.chat.id, len, max_len = self.max_len, "Message too long, ignoring");
            return Ok(false);
        }
        Ok(true)
    }
}
