//! Handlers for logging and username-based auth (allowlist).

use async_trait::async_trait;
use dlbot_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument, warn};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.username_or_unknown(),
            message_type = %message.message_type,
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Stops the chain with Unauthorized unless the sender's username is on the allowlist.
///
/// Senders without a username and an empty allowlist are always rejected.
pub struct AuthHandler {
    allowed_usernames: Vec<String>,
}

impl AuthHandler {
    pub fn new(allowed_usernames: Vec<String>) -> Self {
        Self { allowed_usernames }
    }

    pub fn is_authorized(&self, username: Option<&str>) -> bool {
        match username {
            Some(name) if !name.is_empty() => self.allowed_usernames.iter().any(|u| u == name),
            _ => false,
        }
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let username = message.user.username.as_deref();
        if self.is_authorized(username) {
            debug!(user_id = message.user.id, username = ?username, "User authorized");
            return Ok(true);
        }

        if username.map_or(true, str::is_empty) {
            warn!(user_id = message.user.id, "Sender has no username");
        } else if self.allowed_usernames.is_empty() {
            warn!(user_id = message.user.id, "Allowed users list is empty");
        } else {
            warn!(user_id = message.user.id, username = ?username, "User is not in the allowed list");
        }
        Err(HandlerError::Unauthorized.into())
    }
}
