// Route definitions

use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

use crate::auth::require_auth;
use crate::config::BasicAuthCredentials;
use crate::conversation::ConversationManager;
use crate::handlers;

/// Largest accepted chat request body
const MAX_BODY_BYTES: u64 = 64 * 1024;

fn with_manager(
    manager: Arc<ConversationManager>,
) -> impl Filter<Extract = (Arc<ConversationManager>,), Error = Infallible> + Clone {
    warp::any().map(move || manager.clone())
}

pub fn configure_routes(
    manager: Arc<ConversationManager>,
    auth: Option<BasicAuthCredentials>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let api = warp::path("api").and(warp::path("v1"));

    // GET /api/v1/messages
    let get_history = api
        .and(warp::path("messages"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_manager(manager.clone()))
        .and_then(handlers::get_history_handler);

    // POST /api/v1/chat
    let post_chat = api
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_manager(manager.clone()))
        .and_then(handlers::send_message_handler);

    // POST /api/v1/clear-history
    let clear_history = api
        .and(warp::path("clear-history"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_manager(manager.clone()))
        .and_then(handlers::clear_history_handler);

    // GET /api/v1/models
    let list_models = api
        .and(warp::path("models"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_manager(manager))
        .and_then(handlers::list_models_handler);

    // Combine routes
    require_auth(auth)
        .and(get_history.or(post_chat).or(clear_history).or(list_models))
        .recover(handlers::handle_rejection)
}
