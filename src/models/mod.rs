pub mod chat;
pub mod message;
pub mod preferences;
pub mod status;

pub use chat::Chat;
pub use message::{Message, Role};
pub use preferences::Preferences;
pub use status::{Status, StatusState};
