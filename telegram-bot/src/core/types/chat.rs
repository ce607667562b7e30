//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Chat with only an id known; the type is reported as `unknown`.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            chat_type: "unknown".to_string(),
        }
    }
}
