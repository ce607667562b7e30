//! Handlers for logging and the single-admin access policy.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Admin id meaning "no restriction": every chat is allowed.
pub const NO_ADMIN: i64 = 0;

/// Reply sent to chats that are not the configured admin.
pub const ACCESS_DENIED_REPLY: &str = "Access denied.";

/// Access policy: allowed when no admin is configured or the chat is the admin.
pub fn is_allowed(chat_id: i64, admin_id: i64) -> bool {
    admin_id == NO_ADMIN || chat_id == admin_id
}

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            chat_id = message.chat.id,
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            "Message from {}: {}",
            message.chat.id,
            message.content
        );
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Replies with [`ACCESS_DENIED_REPLY`] and ends the chain when the chat is not allowed,
/// so later handlers (commands, echo) never see the message.
pub struct AccessHandler {
    admin_id: i64,
}

impl AccessHandler {
    /// Creates a handler for the given admin id; [`NO_ADMIN`] allows every chat.
    pub fn new(admin_id: i64) -> Self {
        Self { admin_id }
    }
}

#[async_trait]
impl Handler for AccessHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if is_allowed(message.chat.id, self.admin_id) {
            Ok(HandlerResponse::Continue)
        } else {
            warn!(admin_id = self.admin_id, "Access denied");
            Ok(HandlerResponse::Reply(ACCESS_DENIED_REPLY.to_string()))
        }
    }
}
