//! Bot configuration: [`BotConfig`] built once at startup from CLI overrides, an env file and
//! the process environment, then passed by value into the runner.

mod bot_config;
mod env_file;


pub use bot_config::{
    parse_admin_id, BotConfig, ConfigError, DEFAULT_BACKOFF_MS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_POLL_TIMEOUT_SECS,
};
pub use env_file::EnvFile;
