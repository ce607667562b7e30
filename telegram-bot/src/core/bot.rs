//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in
//! [`crate::telegram::TelegramBotAdapter`]. Tests substitute a recording mock.

use crate::core::error::Result;
use crate::core::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for delivering replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat. `Err` means the reply was not delivered.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
