//! Mapping between abstraction types and chat completions types

use crate::llm::core::types::{ConversationTurn, TurnRole};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Convert conversation turns to a chat completions request
pub fn to_chat_request(history: &[ConversationTurn], model_id: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        messages: history
            .iter()
            .map(|turn| ChatMessage {
                role: match turn.role {
                    TurnRole::User => "user".to_string(),
                    TurnRole::Assistant => "assistant".to_string(),
                },
                content: turn.text.clone(),
            })
            .collect(),
        model: model_id.to_string(),
    }
}

/// Content of the first choice, if the provider returned any
pub fn from_chat_response(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
}
