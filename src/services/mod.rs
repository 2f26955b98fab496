pub mod chat;
pub mod context;
pub mod session;
pub mod settings;
pub mod store;

pub use chat::ChatClient;
pub use session::ChatSessionManager;
pub use settings::SettingsService;
pub use store::ChatStore;
