//! # Telegram bot
//!
//! Long-polling Telegram bot: fetches updates with getUpdates, runs each text message through a
//! handler chain (logging, single-admin access policy, `/start` `/ping` `/help`, echo) and sends
//! the reply with sendMessage. Config is loaded once at startup and passed into [`run_bot`].

pub mod chain;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod telegram;

// Re-export core
pub use crate::core::{
    init_tracing, Bot, BotError, Chat, Handler, HandlerResponse, Message, Result,
    ToCoreMessage, ToCoreUser, User,
};

pub use crate::chain::HandlerChain;

pub use telegram::{
    encode_text, parse_updates, ReqwestTransport, TelegramBotAdapter, TelegramClient,
    TelegramMessageWrapper, TelegramUserWrapper, Transport, Update,
};

pub use components::{
    build_bot_components, build_bot_components_with_transport, build_handler_chain,
    BotComponents,
};
pub use config::{BotConfig, ConfigError, EnvFile};
pub use handlers::{
    dispatch_command, is_allowed, AccessHandler, CommandHandler, EchoHandler, LoggingHandler,
    ACCESS_DENIED_REPLY,
};
pub use runner::{run_bot, BackoffReason, PollOutcome, UpdateLoop};

pub use tokio_util::sync::CancellationToken;
