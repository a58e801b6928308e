// Handlers module

pub mod chat;
pub mod history;
pub mod models;
pub mod rejection;

pub use chat::send_message_handler;
pub use history::{clear_history_handler, get_history_handler};
pub use models::list_models_handler;
pub use rejection::handle_rejection;

use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::conversation::ChatError;
use crate::models::ErrorResponse;

/// HTTP status for a failed chat operation
pub fn status_for(err: &ChatError) -> StatusCode {
    match err {
        ChatError::EmptyMessage | ChatError::UnknownModel(_) | ChatError::MissingCredential { .. } => {
            StatusCode::BAD_REQUEST
        }
        ChatError::Provider(_) => StatusCode::BAD_GATEWAY,
        ChatError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_reply(err: &ChatError) -> WithStatus<Json> {
    let body = ErrorResponse {
        error: err.user_message(),
    };
    warp::reply::with_status(warp::reply::json(&body), status_for(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;

    #[test]
    fn test_status_for() {
        assert_eq!(status_for(&ChatError::EmptyMessage), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&ChatError::Provider(LlmError::ConnectionError {
                endpoint: "http://x".to_string(),
                reason: "refused".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
