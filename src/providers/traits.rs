use async_trait::async_trait;

use super::types::{ChatRequest, ProviderError};

/// Remote completion endpoint: one request, one reply text. No streaming,
/// no retries; a failure is terminal for that turn.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError>;
}
