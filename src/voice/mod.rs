use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice capability not available")]
    Unavailable,

    #[error("Recognition failed: {0}")]
    Recognition(String),
}

/// What the host platform can actually do. The core consults this instead
/// of probing for platform speech APIs at call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceCapabilities {
    pub recognition: bool,
    pub synthesis: bool,
}

/// Adapter over platform speech recognition and synthesis. The core needs
/// exactly two things: text from speech, and speech from text.
#[async_trait]
pub trait VoiceBridge: Send + Sync {
    fn capabilities(&self) -> VoiceCapabilities;

    /// Capture one utterance and return its transcript.
    async fn listen_once(&self) -> Result<String, VoiceError>;

    /// Abort an in-progress capture.
    fn stop(&self);

    /// Fire-and-forget speech output.
    fn speak(&self, text: &str);
}

/// Bridge for hosts with no speech support.
#[derive(Debug, Default)]
pub struct NullVoiceBridge;

#[async_trait]
impl VoiceBridge for NullVoiceBridge {
    fn capabilities(&self) -> VoiceCapabilities {
        VoiceCapabilities::default()
    }

    async fn listen_once(&self) -> Result<String, VoiceError> {
        Err(VoiceError::Unavailable)
    }

    fn stop(&self) {}

    fn speak(&self, _text: &str) {}
}
