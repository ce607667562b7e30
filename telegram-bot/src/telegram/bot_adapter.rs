//! [`crate::core::Bot`] over [`TelegramClient`]: replies go out through sendMessage.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::TelegramClient;
use crate::core::{Bot as CoreBot, Chat, Result};

/// Thin wrapper around [`TelegramClient`] that implements core's Bot trait.
pub struct TelegramBotAdapter {
    client: Arc<TelegramClient>,
}

impl TelegramBotAdapter {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.client.send_message(chat.id, text).await
    }
}
