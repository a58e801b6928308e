//! Cloud generative client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    config::ProviderConfig, error::LlmError, provider::LlmProvider, types::ConversationTurn,
};
use crate::llm::http::post_json;

use super::mapper::{from_gemini_response, to_gemini_request};
use super::types::GenerateContentResponse;

/// Reply substituted when the call succeeds but carries no usable text
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't get a response from the AI.";

/// Client for `generateContent` endpoints authenticated with an API key
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
}

impl GeminiClient {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(
        &self,
        history: &[ConversationTurn],
        config: &ProviderConfig,
    ) -> Result<String, LlmError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::MissingCredential {
                model_id: config.model_id.clone(),
            })?;

        // The key travels as a query parameter, never as a header
        let mut url = config.endpoint.clone();
        url.query_pairs_mut().append_pair("key", api_key.expose());

        let request = to_gemini_request(history);
        let response: GenerateContentResponse =
            post_json(&self.http_client, url, config.endpoint.as_str(), None, &request).await?;

        Ok(from_gemini_response(response).unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
