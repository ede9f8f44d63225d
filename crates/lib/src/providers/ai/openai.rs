use crate::{errors::PromptError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// The chat model used when none is configured.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI API or any OpenAI-compatible service.
///
/// `api_url` is the versioned base (e.g. `https://api.openai.com/v1`); the
/// completion and model-listing endpoints are derived from it.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    ///
    /// Surrounding whitespace is stripped from `api_key`; a key that is
    /// empty after stripping is rejected as missing, so a whitespace-only
    /// credential never reaches the network.
    pub fn new(api_url: &str, api_key: &str, model: Option<String>) -> Result<Self, PromptError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    /// Sends one non-streaming completion request and returns the first
    /// choice's message content.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ];

        // Default sampling parameters: no temperature or top_p override.
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.api_url);
        debug!(%url, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let answer = completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(answer)
    }

    /// Verifies the API key with a model-listing call.
    ///
    /// A single failed attempt is terminal for this key; the caller must
    /// construct a new provider to retry.
    async fn verify_credential(&self) -> Result<(), PromptError> {
        let url = format!("{}/models", self.api_url);
        debug!(%url, "Verifying API credential");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        Ok(())
    }
}
