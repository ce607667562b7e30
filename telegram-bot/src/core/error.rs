//! Error types for the bot core.

use thiserror::Error;

/// Errors from talking to the Bot API. Custom handlers may return them too.
#[derive(Error, Debug)]
pub enum BotError {
    /// Request could not be built, sent, or read, or the status was not 2xx.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered but the body was not JSON or `ok` was not true.
    #[error("API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
