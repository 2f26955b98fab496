use anyhow::Result;

use super::store::{
    ChatStore, API_KEY_KEY, CONTEXT_ENABLED_KEY, MODEL_KEY, PERSISTENCE_ENABLED_KEY,
};
use crate::models::Preferences;

pub struct SettingsService;

impl SettingsService {
    /// Load preferences, falling back to defaults for any missing key.
    /// Context defaults on unless explicitly stored as "false"; persistence
    /// defaults off unless explicitly stored as "true".
    pub async fn load(store: &ChatStore) -> Preferences {
        let defaults = Preferences::default();

        let api_key = match store.get(API_KEY_KEY).await {
            Ok(Some(value)) => value,
            _ => defaults.api_key,
        };
        let model = match store.get(MODEL_KEY).await {
            Ok(Some(value)) => value,
            _ => defaults.model,
        };
        let context_enabled = match store.get(CONTEXT_ENABLED_KEY).await {
            Ok(Some(value)) => value != "false",
            _ => defaults.context_enabled,
        };
        let persistence_enabled = match store.get(PERSISTENCE_ENABLED_KEY).await {
            Ok(Some(value)) => value == "true",
            _ => defaults.persistence_enabled,
        };

        Preferences {
            api_key,
            model,
            context_enabled,
            persistence_enabled,
        }
    }

    pub async fn save(store: &ChatStore, prefs: &Preferences) -> Result<()> {
        store.set(API_KEY_KEY, &prefs.api_key).await?;
        store.set(MODEL_KEY, &prefs.model).await?;
        store
            .set(CONTEXT_ENABLED_KEY, &prefs.context_enabled.to_string())
            .await?;
        store
            .set(
                PERSISTENCE_ENABLED_KEY,
                &prefs.persistence_enabled.to_string(),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_defaults_from_empty_store() {
        let store = ChatStore::new_in_memory().unwrap();
        let prefs = SettingsService::load(&store).await;
        assert_eq!(prefs, Preferences::default());
        assert!(prefs.context_enabled);
        assert!(!prefs.persistence_enabled);
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = ChatStore::new_in_memory().unwrap();
        let prefs = Preferences {
            api_key: "sk-or-test".to_string(),
            model: "anthropic/claude-sonnet-4".to_string(),
            context_enabled: false,
            persistence_enabled: true,
        };

        SettingsService::save(&store, &prefs).await.unwrap();

        assert_eq!(SettingsService::load(&store).await, prefs);
    }

    #[tokio::test]
    async fn test_flag_text_semantics() {
        let store = ChatStore::new_in_memory().unwrap();

        store.set(CONTEXT_ENABLED_KEY, "garbage").await.unwrap();
        store.set(PERSISTENCE_ENABLED_KEY, "garbage").await.unwrap();

        let prefs = SettingsService::load(&store).await;
        assert!(prefs.context_enabled);
        assert!(!prefs.persistence_enabled);
    }
}
