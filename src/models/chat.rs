use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::Message;
use crate::config::DEFAULT_CHAT_TITLE;

/// One persisted conversation: an ordered message log plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_CHAT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True while the title is still the sentinel, i.e. no title has been
    /// derived from a user message yet.
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_CHAT_TITLE
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}
