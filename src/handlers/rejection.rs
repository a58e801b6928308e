// Turns warp rejections into JSON error replies

use std::convert::Infallible;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::auth::{Unauthorized, REALM};
use crate::models::ErrorResponse;

pub async fn handle_rejection(err: Rejection) -> Result<Box<dyn Reply>, Infallible> {
    if err.find::<Unauthorized>().is_some() {
        let reply = warp::reply::with_status(
            warp::reply::json(&ErrorResponse {
                error: "Authentication required.".to_string(),
            }),
            StatusCode::UNAUTHORIZED,
        );
        return Ok(Box::new(warp::reply::with_header(
            reply,
            "WWW-Authenticate",
            format!("Basic realm=\"{}\"", REALM),
        )));
    }

    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large.".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        warn!("rejected request body with unsupported content type");
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Request body must be JSON.".to_string(),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        warn!("rejected request body without content length");
        (
            StatusCode::LENGTH_REQUIRED,
            "A content-length header is required.".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.".to_string())
    } else {
        error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        )
    };

    Ok(Box::new(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { error: message }),
        status,
    )))
}
