// GET /api/v1/models handler

use std::convert::Infallible;
use std::sync::Arc;

use crate::conversation::ConversationManager;
use crate::models::ModelsResponse;

pub async fn list_models_handler(
    manager: Arc<ConversationManager>,
) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ModelsResponse::from(manager.registry())))
}
