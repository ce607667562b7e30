//! Request/response primitive over HTTP GET.
//!
//! [`Transport`] is the seam tests replace; [`ReqwestTransport`] is the production impl.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::{BotError, Result};

/// User agent sent with every request.
pub const USER_AGENT: &str = "simple-telegram-bot/1.0";

/// Maximum number of characters of a response body quoted in logs and errors.
const PREVIEW_CHARS: usize = 300;

/// Performs an HTTP GET and returns the full response body.
///
/// Connect errors, timeouts, non-success statuses and unreadable bodies are all `Err`.
/// Callers treat an `Err` the same as an empty body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

/// reqwest-backed transport with a whole-call timeout.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client whose calls time out after `timeout` (must exceed the long-poll wait).
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BotError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            // without_url: the URL carries the bot token
            .map_err(|e| BotError::Transport(format!("Request failed: {}", e.without_url())))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Transport(format!("Failed to read body: {}", e.without_url())))?;
        debug!(status = %status, body_len = body.len(), "HTTP response");
        if !status.is_success() {
            return Err(BotError::Transport(format!(
                "HTTP {}: {}",
                status,
                body_preview(&body)
            )));
        }
        Ok(body)
    }
}

/// First 300 characters of a body, for logs.
pub fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
