//! Transport-neutral core: the Handler and Bot traits, message types, errors and logging.
//! The Telegram layer converts its wire types into these.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
