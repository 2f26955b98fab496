#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Ready,
    Loading,
    Error,
}

/// Current phase of the request lifecycle, with a human-readable label.
/// Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: StatusState,
    pub text: String,
}

impl Status {
    pub fn ready() -> Self {
        Self {
            state: StatusState::Ready,
            text: "Ready".to_string(),
        }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self {
            state: StatusState::Loading,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            state: StatusState::Error,
            text: text.into(),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::ready()
    }
}
