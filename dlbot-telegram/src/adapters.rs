//! Adapters from Telegram (teloxide) types to dlbot_core types.

use dlbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message (regular message or channel post) for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Kind of attached media, if any.
    pub fn media_kind(&self) -> Option<&'static str> {
        let msg = self.0;
        if msg.video().is_some() {
            Some("video")
        } else if msg.audio().is_some() {
            Some("audio")
        } else if msg.photo().is_some() {
            Some("photo")
        } else if msg.document().is_some() {
            Some("document")
        } else if msg.sticker().is_some() {
            Some("sticker")
        } else {
            None
        }
    }

    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else if chat.is_channel() {
            "channel"
        } else {
            "unknown"
        }
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let media = self.media_kind();
        let text = self.0.text();
        let message_type = match (media, text) {
            (Some(kind), _) => kind,
            (None, Some(_)) => "text",
            (None, None) => "other",
        };
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: self.chat_type().to_string(),
            },
            content: text.or_else(|| self.0.caption()).unwrap_or("").to_string(),
            message_type: message_type.to_string(),
            has_media: media.is_some(),
            created_at: chrono::Utc::now(),
        }
    }
}
