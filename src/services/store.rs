use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;

use crate::models::Chat;

pub const CHAT_HISTORY_KEY: &str = "pro_chat_history";
pub const API_KEY_KEY: &str = "openrouter_api_key";
pub const MODEL_KEY: &str = "openrouter_model";
pub const CONTEXT_ENABLED_KEY: &str = "context_enabled";
pub const PERSISTENCE_ENABLED_KEY: &str = "memory_enabled";

/// Durable key-value store for the chat collection and preferences.
///
/// Pure serialize/deserialize over a single `store(key, value)` table; it
/// never owns data, it mirrors whatever the session currently holds.
#[derive(Debug, Clone)]
pub struct ChatStore {
    conn: Arc<Mutex<Connection>>,
}

impl ChatStore {
    pub async fn new() -> Result<Self> {
        let path = Self::store_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = ChatStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory store (used for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = ChatStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn store_path() -> Result<PathBuf> {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                std::env::var("HOME").map(|home| PathBuf::from(home).join(".local/share"))
            })
            .context("Neither XDG_DATA_HOME nor HOME is set")?;
        Ok(data_dir.join("prochat").join("prochat.db"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.clone();
        let key = key.to_string();
        task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let result: Option<String> = conn
                .query_row(
                    "SELECT value FROM store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(result)
        })
        .await?
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.clone();
        let key = key.to_string();
        let value = value.to_string();
        task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            conn.execute(
                "INSERT INTO store (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            Ok(())
        })
        .await?
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.clone();
        let key = key.to_string();
        task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            conn.execute("DELETE FROM store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await?
    }

    /// Load the persisted chat collection. No stored value means an empty
    /// collection; an unreadable value is treated the same way.
    pub async fn load_chats(&self) -> Result<Vec<Chat>> {
        match self.get(CHAT_HISTORY_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize and write the full collection. One-shot, no incremental
    /// writes.
    pub async fn save_chats(&self, chats: &[Chat]) -> Result<()> {
        let json = serde_json::to_string(chats)?;
        self.set(CHAT_HISTORY_KEY, &json).await
    }

    pub async fn delete_chats(&self) -> Result<()> {
        self.remove(CHAT_HISTORY_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Role};

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = ChatStore::new_in_memory().unwrap();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = ChatStore::new_in_memory().unwrap();

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_chats_empty_store() {
        let store = ChatStore::new_in_memory().unwrap();
        assert!(store.load_chats().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chats_round_trip() {
        let store = ChatStore::new_in_memory().unwrap();

        let mut chat = Chat::new();
        chat.title = "greetings".to_string();
        chat.messages.push(Message::new(Role::User, "Hello"));
        chat.messages.push(Message::new(Role::Assistant, "Hi there"));
        let chats = vec![chat, Chat::new()];

        store.save_chats(&chats).await.unwrap();
        let loaded = store.load_chats().await.unwrap();

        assert_eq!(loaded, chats);
    }

    #[tokio::test]
    async fn test_delete_chats_removes_key() {
        let store = ChatStore::new_in_memory().unwrap();
        store.save_chats(&[Chat::new()]).await.unwrap();

        store.delete_chats().await.unwrap();

        assert_eq!(store.get(CHAT_HISTORY_KEY).await.unwrap(), None);
        assert!(store.load_chats().await.unwrap().is_empty());
    }
}
