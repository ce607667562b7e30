//! Telegram Bot API wire types, parsed leniently.
//!
//! Absent fields take safe defaults (0, empty, `None`); an update whose shape does not fit is
//! kept with only its `update_id` so the offset still advances past it.

use serde::Deserialize;
use tracing::warn;

use crate::core::{BotError, Result};

/// `{"ok": bool, "result": T, "description": "..."}` envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One entry of a getUpdates batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<TgUser>,
    #[serde(default)]
    pub chat: Option<TgChat>,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TgChat {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TgUser {
    #[serde(default)]
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Update {
    /// Lenient conversion of one raw batch item. Never fails: an item that does not match the
    /// expected shape keeps its `update_id` (0 if unreadable) and loses its message.
    pub fn from_value(value: serde_json::Value) -> Self {
        let update_id = value.get("update_id").and_then(|v| v.as_i64()).unwrap_or(0);
        match serde_json::from_value::<Update>(value) {
            Ok(update) => update,
            Err(e) => {
                warn!(update_id, error = %e, "Unexpected update shape, skipping message");
                Update {
                    update_id,
                    message: None,
                }
            }
        }
    }

    /// The message when it carries both a chat and a text; `None` means "skip this update".
    pub fn text_message(&self) -> Option<(&IncomingMessage, &TgChat, &str)> {
        let message = self.message.as_ref()?;
        let chat = message.chat.as_ref()?;
        let text = message.text.as_deref()?;
        Some((message, chat, text))
    }
}

/// Parses a getUpdates body. Not JSON, or `ok` not true, is an error (malformed payload).
/// A missing `result` is an empty batch.
pub fn parse_updates(body: &str) -> Result<Vec<Update>> {
    let response: ApiResponse<Vec<serde_json::Value>> = serde_json::from_str(body)
        .map_err(|e| BotError::Api(format!("Bad JSON: {}", e)))?;
    if !response.ok {
        return Err(BotError::Api(format!(
            "ok=false: {}",
            response.description.unwrap_or_default()
        )));
    }
    Ok(response
        .result
        .unwrap_or_default()
        .into_iter()
        .map(Update::from_value)
        .collect())
}
