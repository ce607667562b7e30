//! Handler implementations: logging, access policy, commands and echo fallback.

mod command_handler;
mod logging_auth;

pub use command_handler::{
    dispatch_command, CommandHandler, EchoHandler, ECHO_PREFIX, HELP_REPLY, PING_REPLY,
    START_REPLY,
};
pub use logging_auth::{is_allowed, AccessHandler, LoggingHandler, ACCESS_DENIED_REPLY, NO_ADMIN};
