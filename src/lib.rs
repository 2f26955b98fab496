//! Chat-session core for a single-user conversational client.
//!
//! Owns the collection of named chats, assembles the conversation context
//! sent to the remote completion endpoint on each turn, and drives the
//! request lifecycle. The host shell (whatever renders the chats and wires
//! up input) talks to [`ChatClient`]; platform speech support plugs in
//! through [`voice::VoiceBridge`].

pub mod config;
pub mod models;
pub mod providers;
pub mod services;
pub mod voice;

pub use models::{Chat, Message, Preferences, Role, Status, StatusState};
pub use providers::{ChatRequest, ChatTurn, CompletionProvider, OpenRouterProvider, ProviderError};
pub use services::chat::{ChatClient, SendError};
pub use services::context::build_request_turns;
pub use services::session::{ChatSessionManager, SessionError};
pub use services::store::ChatStore;
pub use voice::{NullVoiceBridge, VoiceBridge, VoiceCapabilities, VoiceError};
