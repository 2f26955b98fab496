/// Client name sent in the `X-Title` request header.
pub const APP_TITLE: &str = "Pro-Chat";

/// OpenRouter chat-completions endpoint.
pub const COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Instruction turn prepended to every outbound conversation.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Provide clear, concise responses suitable for technical users.";

pub const DEFAULT_MODEL: &str = "x-ai/grok-4";

/// Sentinel title a chat carries until its first user message arrives.
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

// Fixed generation parameters. Configuration, not computed state.
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

/// Derived chat titles are cut to this many characters.
pub const TITLE_MAX_CHARS: usize = 50;
