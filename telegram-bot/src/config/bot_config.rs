//! [`BotConfig`]: token, admin id, API endpoint and loop timing.

use std::env;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use super::env_file::EnvFile;
use crate::handlers::NO_ADMIN;
use crate::telegram::DEFAULT_API_URL;

pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 35;
pub const DEFAULT_BACKOFF_MS: u64 = 800;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN is not set")]
    MissingToken,

    #[error("TELEGRAM_API_URL is set but not a valid URL: {0}")]
    InvalidApiUrl(String),

    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runtime configuration. Built once at process entry; never read from globals afterwards.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN (required, non-empty)
    pub bot_token: String,
    /// TELEGRAM_ADMIN_ID; 0 allows every chat
    pub admin_id: i64,
    /// TELEGRAM_API_URL
    pub telegram_api_url: String,
    /// TELEGRAM_POLL_TIMEOUT_SECS: server-side long-poll wait
    pub poll_timeout_secs: u64,
    /// TELEGRAM_HTTP_TIMEOUT_SECS: whole-call transport timeout
    pub http_timeout_secs: u64,
    /// TELEGRAM_BACKOFF_MS: idle delay after a failed poll
    pub backoff_ms: u64,
    /// LOG_FILE: optional file teed with stdout
    pub log_file: Option<String>,
}

impl BotConfig {
    /// Loads config. Precedence: `token` / `admin_id` overrides, then `env_file`, then the
    /// process environment. A missing env file is fine; a missing or empty token is
    /// [`ConfigError::MissingToken`].
    pub fn load(
        env_file: impl AsRef<Path>,
        token: Option<String>,
        admin_id: Option<i64>,
    ) -> Result<Self, ConfigError> {
        let path = env_file.as_ref();
        let file = EnvFile::read(path).map_err(|source| ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        })?;

        let lookup = |key: &str| {
            file.get(key)
                .map(str::to_string)
                .or_else(|| env::var(key).ok())
        };
        let mut config = Self::from_lookup(lookup, token)?;
        if let Some(admin_id) = admin_id {
            config.admin_id = admin_id;
        }
        Ok(config)
    }

    /// Builds config from a key lookup. `token` overrides TELEGRAM_BOT_TOKEN when non-empty.
    pub fn from_lookup<F>(lookup: F, token: Option<String>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN"))
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let admin_id = lookup("TELEGRAM_ADMIN_ID")
            .map(|s| parse_admin_id(&s))
            .unwrap_or(NO_ADMIN);
        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };
        let poll_timeout_secs = number("TELEGRAM_POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS);
        let http_timeout_secs = number("TELEGRAM_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);
        let backoff_ms = number("TELEGRAM_BACKOFF_MS", DEFAULT_BACKOFF_MS);
        let log_file = lookup("LOG_FILE").filter(|s| !s.trim().is_empty());

        Ok(Self {
            bot_token,
            admin_id,
            telegram_api_url,
            poll_timeout_secs,
            http_timeout_secs,
            backoff_ms,
            log_file,
        })
    }

    /// Config with the given token and defaults for everything else.
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            admin_id: NO_ADMIN,
            telegram_api_url: DEFAULT_API_URL.to_string(),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            backoff_ms: DEFAULT_BACKOFF_MS,
            log_file: None,
        }
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        match reqwest::Url::parse(&self.telegram_api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::InvalidApiUrl(self.telegram_api_url.clone())),
        }
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Parses an admin id the way C `atoll` does: leading whitespace, optional sign, then leading
/// digits. No digits (or overflow) yields [`NO_ADMIN`].
pub fn parse_admin_id(raw: &str) -> i64 {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(|c: char| c == '+' || c == '-'));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return NO_ADMIN;
    }
    s[..sign_len + digits_len].parse().unwrap_or(NO_ADMIN)
}
