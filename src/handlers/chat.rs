// POST /api/v1/chat handler

use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;

use super::error_reply;
use crate::conversation::ConversationManager;
use crate::models::{ChatRequest, ChatResponse};

pub async fn send_message_handler(
    request: ChatRequest,
    manager: Arc<ConversationManager>,
) -> Result<impl warp::Reply, Infallible> {
    info!(model = ?request.llm_model, "POST /api/v1/chat");

    match manager
        .send_message(&request.message, request.llm_model.as_deref())
        .await
    {
        Ok(turn) => Ok(warp::reply::with_status(
            warp::reply::json(&ChatResponse::from(turn)),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(&err)),
    }
}
