use crate::config::DEFAULT_MODEL;

/// User preferences. Loaded once at client construction and replaced only
/// wholesale through an explicit save; an in-progress settings edit never
/// leaks into outbound requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Preferences {
    pub api_key: String,
    pub model: String,
    /// Send the full chat history with each turn, or only the latest turn.
    pub context_enabled: bool,
    /// Mirror the chat collection to durable storage on every change.
    pub persistence_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            context_enabled: true,
            persistence_enabled: false,
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("context_enabled", &self.context_enabled)
            .field("persistence_enabled", &self.persistence_enabled)
            .finish()
    }
}
