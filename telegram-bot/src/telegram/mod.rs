//! Telegram Bot API layer: HTTP transport, text encoding, getUpdates / sendMessage client,
//! wire types, conversion to core messages, and the [`crate::core::Bot`] implementation.

mod adapters;
mod bot_adapter;
mod client;
mod encode;
mod transport;
mod types;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use client::{TelegramClient, DEFAULT_API_URL};
pub use encode::encode_text;
pub use transport::{body_preview, ReqwestTransport, Transport, USER_AGENT};
pub use types::{parse_updates, ApiResponse, IncomingMessage, TgChat, TgUser, Update};
