use chrono::Utc;
use thiserror::Error;

use crate::config::{DEFAULT_CHAT_TITLE, TITLE_MAX_CHARS};
use crate::models::{Chat, Message, Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No active chat")]
    NoActiveChat,

    #[error("Chat not found: {0}")]
    ChatNotFound(String),
}

/// Owns the chat collection and the active-chat pointer. The most recently
/// created chat sits at the front of the collection; at most one chat is
/// active at a time, and the active id always references a chat that is
/// present (or is `None`).
///
/// All mutation of the collection goes through this type. On a
/// multi-threaded host, callers serialize access (the client wraps it in a
/// mutex).
#[derive(Debug, Default)]
pub struct ChatSessionManager {
    chats: Vec<Chat>,
    active_id: Option<String>,
}

impl ChatSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a previously saved collection. The front chat (most recent)
    /// becomes active.
    pub fn from_saved(chats: Vec<Chat>) -> Self {
        let active_id = chats.first().map(|c| c.id.clone());
        Self { chats, active_id }
    }

    /// Insert a new empty chat at the front of the collection and make it
    /// active. Always succeeds.
    pub fn create_chat(&mut self) -> String {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.chats.insert(0, chat);
        self.active_id = Some(id.clone());
        id
    }

    /// Return the active chat id, creating a chat first if none is active.
    /// Resolving the id here, in the same step as creation, is what lets a
    /// send proceed without waiting for any state to settle.
    pub fn ensure_active_chat(&mut self) -> String {
        match self.active_id.clone() {
            Some(id) => id,
            None => self.create_chat(),
        }
    }

    pub fn switch_to(&mut self, id: &str) -> Result<(), SessionError> {
        if self.chats.iter().any(|c| c.id == id) {
            self.active_id = Some(id.to_string());
            Ok(())
        } else {
            Err(SessionError::ChatNotFound(id.to_string()))
        }
    }

    /// Remove a chat from the collection. Deleting the active chat promotes
    /// the front of the remaining collection; deleting the last chat leaves
    /// no active chat. Absent ids are ignored.
    pub fn delete_chat(&mut self, id: &str) {
        self.chats.retain(|c| c.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.chats.first().map(|c| c.id.clone());
        }
    }

    /// Append a message to the active chat's log.
    pub fn append_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<(), SessionError> {
        let id = self.active_id.clone().ok_or(SessionError::NoActiveChat)?;
        self.append_to(&id, role, content)
    }

    /// Append a message to a chat by id. Responses that complete after the
    /// user has switched or deleted chats land in the chat they belong to,
    /// never in whichever chat happens to be active.
    pub fn append_to(
        &mut self,
        id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> Result<(), SessionError> {
        let chat = self
            .chat_mut(id)
            .ok_or_else(|| SessionError::ChatNotFound(id.to_string()))?;
        chat.messages.push(Message::new(role, content));
        chat.updated_at = Utc::now();
        Ok(())
    }

    /// Set the chat's title from its first user message. Does nothing once a
    /// title has been derived, so repeated calls keep the first result.
    pub fn derive_title_if_unset(&mut self, id: &str, text: &str) {
        if let Some(chat) = self.chat_mut(id) {
            if chat.has_default_title() {
                chat.title = truncate_title(text);
            }
        }
    }

    /// Empty the active chat's log and reset its title to the sentinel.
    /// No-op when no chat is active.
    pub fn clear_active_chat(&mut self) {
        let Some(id) = self.active_id.clone() else {
            return;
        };
        if let Some(chat) = self.chat_mut(&id) {
            chat.messages.clear();
            chat.title = DEFAULT_CHAT_TITLE.to_string();
            chat.updated_at = Utc::now();
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_chat(&self) -> Option<&Chat> {
        let id = self.active_id.as_deref()?;
        self.get(id)
    }

    /// Message log of the active chat; empty when no chat is active.
    pub fn active_messages(&self) -> &[Message] {
        self.active_chat()
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn get(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    fn chat_mut(&mut self, id: &str) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| c.id == id)
    }
}

/// Truncate text to a chat title: cut to [`TITLE_MAX_CHARS`] characters
/// with an ellipsis marker when shortened.
fn truncate_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
