// GET /api/v1/messages and POST /api/v1/clear-history handlers

use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;

use super::error_reply;
use crate::conversation::ConversationManager;
use crate::models::{ClearResponse, HistoryResponse, MessageView};

pub async fn get_history_handler(
    manager: Arc<ConversationManager>,
) -> Result<impl warp::Reply, Infallible> {
    match manager.history().await {
        Ok(messages) => {
            let body = HistoryResponse {
                messages: messages.into_iter().map(MessageView::from).collect(),
            };
            Ok(warp::reply::with_status(
                warp::reply::json(&body),
                StatusCode::OK,
            ))
        }
        Err(err) => Ok(error_reply(&err)),
    }
}

pub async fn clear_history_handler(
    manager: Arc<ConversationManager>,
) -> Result<impl warp::Reply, Infallible> {
    match manager.clear_history().await {
        Ok(removed) => Ok(warp::reply::with_status(
            warp::reply::json(&ClearResponse {
                cleared: true,
                removed,
            }),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(&err)),
    }
}
