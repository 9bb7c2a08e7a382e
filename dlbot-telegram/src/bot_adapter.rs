//! Wraps teloxide::Bot and implements [`dlbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use std::path::Path;

use async_trait::async_trait;
use dlbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, MessageId},
};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements dlbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(sent.id.to_string())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, path: &Path, caption: &str) -> Result<String> {
        debug!(chat_id = chat.id, path = %path.display(), "Uploading video");
        let sent = self
            .bot
            .send_video(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .caption(caption.to_string())
            .supports_streaming(true)
            .await
            .map_err(bot_error)?;
        Ok(sent.id.to_string())
    }
}
