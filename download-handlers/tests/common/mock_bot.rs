//! Mock implementation of [`dlbot_core::Bot`] for handler tests.
//!
//! Every call is sent as a [`BotCall`] to a channel so tests can assert on the exact
//! sequence of Telegram operations without a network.

use async_trait::async_trait;
use dlbot_core::{Bot, Chat, DbotError, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One recorded call on the mock bot.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCall {
    Send { chat_id: i64, text: String },
    Edit { message_id: String, text: String },
    Status { text: String },
    Delete { message_id: String },
    /// `existed` is whether the file was on disk when the upload was attempted.
    Video { caption: String, existed: bool },
}

pub struct MockBot {
    status_id: String,
    calls: mpsc::UnboundedSender<BotCall>,
    pub fail_status: AtomicBool,
    pub fail_edit: AtomicBool,
    pub fail_video: AtomicBool,
}

impl MockBot {
    /// Creates a MockBot returning status id `"100"` and the receiver for its calls.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            status_id: "100".to_string(),
            calls: tx,
            fail_status: AtomicBool::new(false),
            fail_edit: AtomicBool::new(false),
            fail_video: AtomicBool::new(false),
        });
        (bot, rx)
    }

    fn record(&self, call: BotCall) {
        let _ = self.calls.send(call);
    }
}

/// Drains every call recorded so far.
#[allow(dead_code)]
pub fn drain(rx: &mut mpsc::UnboundedReceiver<BotCall>) -> Vec<BotCall> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        if self.fail_edit.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("edit rejected".to_string()));
        }
        self.record(BotCall::Edit {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("send rejected".to_string()));
        }
        self.record(BotCall::Status {
            text: text.to_string(),
        });
        Ok(self.status_id.clone())
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.record(BotCall::Delete {
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn send_video(&self, _chat: &Chat, path: &Path, caption: &str) -> Result<String> {
        self.record(BotCall::Video {
            caption: caption.to_string(),
            existed: path.exists(),
        });
        if self.fail_video.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("upload rejected".to_string()));
        }
        Ok("200".to_string())
    }
}
