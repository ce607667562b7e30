//! Incoming text message in transport-neutral form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One text message as the handler chain sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Telegram `message_id`, as text.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Exact message text as received; never trimmed.
    pub content: String,
    pub created_at: DateTime<Utc>,
}
