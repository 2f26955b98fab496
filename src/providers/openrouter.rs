use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::CompletionProvider;
use super::types::{ChatRequest, ChatTurn, ProviderError};
use crate::config::{APP_TITLE, COMPLETIONS_URL, MAX_TOKENS, TEMPERATURE};

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// OpenRouter chat-completions client. Timeouts are left to reqwest's
/// defaults; there is no explicit deadline.
pub struct OpenRouterProvider {
    client: Client,
}

impl OpenRouterProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn parse_error_message(status: reqwest::StatusCode, body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
            return parsed.error.message;
        }
        format!("HTTP {}: API request failed", status.as_u16())
    }
}

impl Default for OpenRouterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let body = CompletionBody {
            model: &request.model,
            messages: &request.turns,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("content-type", "application/json")
            .header("Authorization", format!("Bearer {}", request.api_key))
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthError(Self::parse_error_message(
                status, &body,
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(Self::parse_error_message(
                status, &body,
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("No content in response".to_string()))
    }
}
