// Optional HTTP basic auth in front of every route

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use warp::{Filter, Rejection};

use crate::config::BasicAuthCredentials;

/// Realm advertised in `WWW-Authenticate` challenges
pub const REALM: &str = "Secure Area";

#[derive(Debug)]
pub struct Unauthorized;

impl warp::reject::Reject for Unauthorized {}

/// Decode an `Authorization: Basic ...` header into (username, password)
pub fn decode_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Filter that passes when auth is disabled or the credentials match
pub fn require_auth(
    credentials: Option<BasicAuthCredentials>,
) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    let credentials = credentials.map(Arc::new);

    warp::header::optional::<String>("authorization")
        .and_then(move |header: Option<String>| {
            let credentials = credentials.clone();
            async move {
                let Some(expected) = credentials else {
                    return Ok(());
                };

                match header.as_deref().and_then(decode_basic) {
                    Some((username, password))
                        if username == expected.username && password == expected.password =>
                    {
                        Ok(())
                    }
                    _ => {
                        tracing::warn!("rejected request with missing or invalid credentials");
                        Err(warp::reject::custom(Unauthorized))
                    }
                }
            }
        })
        .untuple_one()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        // "admin:s3cret"
        assert_eq!(
            decode_basic("Basic YWRtaW46czNjcmV0"),
            Some(("admin".to_string(), "s3cret".to_string()))
        );
        // password containing a colon: "u:a:b"
        assert_eq!(
            decode_basic("basic dTphOmI="),
            Some(("u".to_string(), "a:b".to_string()))
        );
    }

    #[test]
    fn test_decode_basic_rejects_garbage() {
        assert_eq!(decode_basic("Bearer abc"), None);
        assert_eq!(decode_basic("Basic !!!"), None);
        assert_eq!(decode_basic("Basic"), None);
        // "nocolon"
        assert_eq!(decode_basic("Basic bm9jb2xvbg=="), None);
    }
}
