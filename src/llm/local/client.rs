//! Local chat client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    config::ProviderConfig, error::LlmError, provider::LlmProvider, types::ConversationTurn,
};
use crate::llm::http::post_json;

use super::mapper::{from_chat_response, to_chat_request};
use super::types::ChatCompletionResponse;

/// Client for OpenAI-compatible chat completions endpoints
#[derive(Debug, Clone)]
pub struct LocalChatClient {
    http_client: Client,
}

impl LocalChatClient {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl LlmProvider for LocalChatClient {
    async fn complete(
        &self,
        history: &[ConversationTurn],
        config: &ProviderConfig,
    ) -> Result<String, LlmError> {
        let endpoint = config.endpoint.as_str();
        let request = to_chat_request(history, &config.model_id);

        // Local servers rarely need a key; when one is configured it goes in
        // the Authorization header as OpenAI-compatible servers expect
        let bearer = config.api_key.as_ref().map(|key| key.expose());

        let response: ChatCompletionResponse = post_json(
            &self.http_client,
            config.endpoint.clone(),
            endpoint,
            bearer,
            &request,
        )
        .await?;

        from_chat_response(response).ok_or_else(|| LlmError::ProviderServerError {
            endpoint: endpoint.to_string(),
            status: 200,
            detail: Some("response contained no choices".to_string()),
        })
    }
}
