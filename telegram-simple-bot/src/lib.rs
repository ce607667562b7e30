//! # telegram-simple-bot
//!
//! Command-line entry for the echo/command bot: argument parsing and config loading.

pub mod cli;

pub use cli::{load_config, Cli, Commands, RunArgs, MISSING_TOKEN_MESSAGE};
pub use telegram_bot::BotConfig;
