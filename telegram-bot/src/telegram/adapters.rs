//! Telegram wire types → core types.

use chrono::{TimeZone, Utc};

use super::types::{IncomingMessage, TgChat, TgUser};
use crate::core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a TgUser);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id,
            username: self.0.username.clone(),
            first_name: self.0.first_name.clone(),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram text message (with its chat and text already extracted) to core message.
pub struct TelegramMessageWrapper<'a> {
    pub message: &'a IncomingMessage,
    pub chat: &'a TgChat,
    pub text: &'a str,
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.message.message_id.to_string(),
            user: self
                .message
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(User::unknown),
            chat: Chat {
                id: self.chat.id,
                chat_type: self
                    .chat
                    .kind
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            },
            content: self.text.to_string(),
            created_at: Utc
                .timestamp_opt(self.message.date, 0)
                .single()
                .filter(|_| self.message.date > 0)
                .unwrap_or_else(Utc::now),
        }
    }
}
