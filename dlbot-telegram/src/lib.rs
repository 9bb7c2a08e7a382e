//! # dlbot-telegram
//!
//! Telegram layer of the download bot: teloxide → core adapters, [`dlbot_core::Bot`] implementation,
//! per-chat message queue and the long-polling runner. No download logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod queue;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use queue::{ChatQueue, DEFAULT_IDLE_TIMEOUT};
pub use runner::{build_teloxide_bot, run_polling};
