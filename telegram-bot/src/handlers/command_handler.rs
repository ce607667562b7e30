//! Command replies: `/start`, `/ping`, `/help`, and the echo fallback.
//!
//! Matching is exact text equality; no trimming, no case folding, no `@botname` suffix handling.

use async_trait::async_trait;

use crate::core::{Handler, HandlerResponse, Message, Result};

pub const START_REPLY: &str = "Bot is online. Commands: /ping /help";
pub const PING_REPLY: &str = "pong";
pub const HELP_REPLY: &str = "Commands: /ping /help";
pub const ECHO_PREFIX: &str = "Echo: ";

fn command_reply(text: &str) -> Option<&'static str> {
    match text {
        "/start" => Some(START_REPLY),
        "/ping" => Some(PING_REPLY),
        "/help" => Some(HELP_REPLY),
        _ => None,
    }
}

/// Full dispatch table: command reply, or `Echo: <text>` for anything else.
pub fn dispatch_command(text: &str) -> String {
    match command_reply(text) {
        Some(reply) => reply.to_string(),
        None => format!("{ECHO_PREFIX}{text}"),
    }
}

/// Replies to the fixed command set; continues for any other text.
#[derive(Clone, Default)]
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Ok(match command_reply(&message.content) {
            Some(reply) => HandlerResponse::Reply(reply.to_string()),
            None => HandlerResponse::Continue,
        })
    }
}

/// Terminal handler: always replies with [`dispatch_command`], so text that got past
/// [`CommandHandler`] is echoed.
#[derive(Clone, Default)]
pub struct EchoHandler;

impl EchoHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(dispatch_command(&message.content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_map_to_fixed_replies() {
        assert_eq!(dispatch_command("/start"), START_REPLY);
        assert_eq!(dispatch_command("/ping"), "pong");
        assert_eq!(dispatch_command("/help"), HELP_REPLY);
    }

    fn text_message(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: crate::core::User::unknown(),
            chat: crate::core::Chat::with_id(42),
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_command_handler_continues_for_non_commands() {
        let handler = CommandHandler::new();
        assert_eq!(
            handler.handle(&text_message("/ping")).await.unwrap(),
            HandlerResponse::Reply(PING_REPLY.to_string())
        );
        assert_eq!(
            handler.handle(&text_message("hello")).await.unwrap(),
            HandlerResponse::Continue
        );
    }

    #[tokio::test]
    async fn test_echo_handler_replies_from_dispatch_table() {
        let handler = EchoHandler::new();
        for text in ["hello", "/help", "/Ping"] {
            assert_eq!(
                handler.handle(&text_message(text)).await.unwrap(),
                HandlerResponse::Reply(dispatch_command(text))
            );
        }
    }

    #[test]
    fn test_other_text_is_echoed_verbatim() {
        assert_eq!(dispatch_command("hello"), "Echo: hello");
        assert_eq!(dispatch_command("/ping "), "Echo: /ping ");
        assert_eq!(dispatch_command(" /ping"), "Echo:  /ping");
        assert_eq!(dispatch_command("/PING"), "Echo: /PING");
        assert_eq!(dispatch_command("/ping@my_bot"), "Echo: /ping@my_bot");
        assert_eq!(dispatch_command("привет 👋"), "Echo: привет 👋");
    }
}
