//! getUpdates / sendMessage over a [`Transport`].

use std::sync::Arc;

use tracing::instrument;

use super::encode::encode_text;
use super::transport::{body_preview, Transport};
use super::types::ApiResponse;
use crate::core::{BotError, Result};

/// Telegram Bot API host used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Builds and issues Bot API requests for one bot token.
pub struct TelegramClient {
    transport: Arc<dyn Transport>,
    api_url: String,
    token: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// `api_url` is the API base (e.g. [`DEFAULT_API_URL`] or a mock server); a trailing
    /// slash is ignored. `poll_timeout_secs` is the server-side long-poll wait.
    pub fn new(
        transport: Arc<dyn Transport>,
        api_url: impl Into<String>,
        token: impl Into<String>,
        poll_timeout_secs: u64,
    ) -> Self {
        let api_url: String = api_url.into();
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            poll_timeout_secs,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    pub fn get_updates_url(&self, offset: i64) -> String {
        format!(
            "{}?timeout={}&offset={}",
            self.method_url("getUpdates"),
            self.poll_timeout_secs,
            offset
        )
    }

    pub fn send_message_url(&self, chat_id: i64, text: &str) -> String {
        format!(
            "{}?chat_id={}&text={}&disable_web_page_preview=true",
            self.method_url("sendMessage"),
            chat_id,
            encode_text(text)
        )
    }

    /// Long-polls for updates at `offset` and returns the raw body.
    /// An `Err` or an empty body are both transient failures for the caller.
    #[instrument(skip(self))]
    pub async fn fetch_updates(&self, offset: i64) -> Result<String> {
        self.transport.get(&self.get_updates_url(offset)).await
    }

    /// Sends `text` to `chat_id` with link previews disabled. `Err` when the request fails or
    /// the API answers `ok: false`. No retry.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = self
            .transport
            .get(&self.send_message_url(chat_id, text))
            .await?;
        let response: ApiResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| {
                BotError::Api(format!(
                    "sendMessage: bad JSON ({}): {}",
                    e,
                    body_preview(&body)
                ))
            })?;
        if !response.ok {
            return Err(BotError::Api(format!(
                "sendMessage failed: {}",
                response
                    .description
                    .unwrap_or_else(|| "ok=false".to_string())
            )));
        }
        Ok(())
    }
}
