//! Mapping between abstraction types and generative language types

use crate::llm::core::types::{ConversationTurn, TurnRole};

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

/// Convert conversation turns to the request format
pub fn to_gemini_request(history: &[ConversationTurn]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: history.iter().map(to_gemini_content).collect(),
    }
}

/// Convert a turn to the content format
fn to_gemini_content(turn: &ConversationTurn) -> Content {
    let role = match turn.role {
        TurnRole::User => "user",
        TurnRole::Assistant => "model",
    };

    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: Some(turn.text.clone()),
        }],
    }
}

/// Text of the first candidate's first part, if there is any
pub fn from_gemini_response(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}
