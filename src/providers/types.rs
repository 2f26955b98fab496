use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Message, Role};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One wire turn: role and content only, any other message fields stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Everything a provider needs for one completion call. Generation
/// parameters (temperature, max tokens) are fixed configuration and live
/// with the provider, not here.
#[derive(Clone)]
pub struct ChatRequest {
    pub api_key: String,
    pub model: String,
    pub turns: Vec<ChatTurn>,
}

impl std::fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRequest")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("turns", &self.turns)
            .finish()
    }
}
