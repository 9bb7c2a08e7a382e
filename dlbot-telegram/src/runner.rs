//! Long-polling runner: converts teloxide messages and channel posts to core messages and feeds
//! them to the [`ChatQueue`]. Ctrl-C stops the dispatcher.

use std::sync::Arc;

use anyhow::Result;
use dlbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::config::TelegramConfig;
use crate::queue::ChatQueue;

/// Creates the teloxide Bot; an invalid API URL is logged and the default one used.
pub fn build_teloxide_bot(config: &TelegramConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Checks the token with get_me, then polls `message` and `channel_post` updates until Ctrl-C.
#[instrument(skip(bot, handler_chain))]
pub async fn run_polling(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reach Telegram (get_me): {}", e))?;
    info!(
        username = ?me.user.username,
        "Bot authorized, starting long polling"
    );

    let queue = Arc::new(ChatQueue::new(handler_chain));

    let on_message = |msg: teloxide::types::Message, queue: Arc<ChatQueue>| async move {
        let core_msg = TelegramMessageWrapper(&msg).to_core();
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            message_type = %core_msg.message_type,
            "Received update"
        );
        queue.enqueue(core_msg);
        respond(())
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_channel_post().endpoint(on_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![queue])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
