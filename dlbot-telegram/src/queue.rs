//! Per-chat FIFO in front of the handler chain.
//!
//! Each chat gets its own worker task fed by an unbounded channel: messages of one chat are
//! handled strictly one after another, different chats run concurrently. A worker that stays
//! idle for the idle timeout removes its chat entry and exits; the next message starts a new one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dlbot_core::Message;
use handler_chain::HandlerChain;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Default time a chat worker waits for the next message before it stops.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

struct ChatWorker {
    id: u64,
    tx: mpsc::UnboundedSender<Message>,
}

type Workers = Arc<DashMap<i64, ChatWorker>>;

pub struct ChatQueue {
    chain: HandlerChain,
    workers: Workers,
    next_worker_id: AtomicU64,
    idle_timeout: Duration,
}

impl ChatQueue {
    pub fn new(chain: HandlerChain) -> Self {
        Self::with_idle_timeout(chain, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(chain: HandlerChain, idle_timeout: Duration) -> Self {
        Self {
            chain,
            workers: Arc::new(DashMap::new()),
            next_worker_id: AtomicU64::new(0),
            idle_timeout,
        }
    }

    /// Number of chats with a running worker.
    pub fn chat_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues `message` behind earlier messages of the same chat. Must be called inside a Tokio runtime.
    ///
    /// The send happens under the map entry lock, so an idle worker cannot remove itself
    /// between lookup and send.
    pub fn enqueue(&self, message: Message) {
        let chat_id = message.chat.id;
        let mut worker = self
            .workers
            .entry(chat_id)
            .or_insert_with(|| self.spawn_worker(chat_id));

        if let Err(mpsc::error::SendError(message)) = worker.tx.send(message) {
            // worker gone; start a fresh one for this chat
            error!(chat_id, "Chat queue closed, restarting worker");
            *worker = self.spawn_worker(chat_id);
            let _ = worker.tx.send(message);
        }
    }

    fn spawn_worker(&self, chat_id: i64) -> ChatWorker {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        let id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
        info!(chat_id, worker_id = id, "Starting chat worker");
        tokio::spawn(Self::process_queue_loop(
            rx,
            self.chain.clone(),
            chat_id,
            id,
            self.workers.clone(),
            self.idle_timeout,
        ));
        ChatWorker { id, tx }
    }

    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        chain: HandlerChain,
        chat_id: i64,
        worker_id: u64,
        workers: Workers,
        idle_timeout: Duration,
    ) {
        loop {
            let message = match tokio::time::timeout(idle_timeout, rx.recv()).await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(_) => {
                    let removed = workers
                        .remove_if(&chat_id, |_, w| w.id == worker_id && rx.is_empty())
                        .is_some();
                    if removed {
                        debug!(chat_id, worker_id, "Chat worker idle, stopping");
                        break;
                    }
                    continue;
                }
            };

            debug!(chat_id, message_id = %message.id, "Processing queued message");
            match chain.handle(&message).await {
                Ok(response) => debug!(chat_id, response = ?response, "Handler chain finished"),
                Err(e) if e.is_unauthorized() => {
                    info!(chat_id, user_id = message.user.id, "Message from unauthorized sender dropped")
                }
                Err(e) => error!(chat_id, error = %e, user_id = message.user.id, "Handler chain failed"),
            }
        }
    }
}
