//! Shared HTTP plumbing for provider clients
//!
//! One POST per call, no retry. Transport failures, non-2xx statuses and
//! undecodable bodies are all folded into the [`LlmError`] taxonomy here so
//! the individual clients only deal with their own payload shapes.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::llm::core::error::LlmError;

/// Connect timeout applied to every provider client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the HTTP client shared by all providers
pub fn build_client(request_timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| LlmError::ClientBuild(e.to_string()))
}

/// POST `body` as JSON to `url` and decode the JSON reply.
///
/// `endpoint` is the credential-free form of `url` used in errors and logs.
/// A `bearer` token, when given, is sent in the `Authorization` header.
pub async fn post_json<B, R>(
    client: &Client,
    url: Url,
    endpoint: &str,
    bearer: Option<&str>,
    body: &B,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!(endpoint, "POST to provider");

    let mut request = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| classify_transport(endpoint, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(endpoint, error = %e, "failed to read provider error body");
                String::new()
            }
        };
        warn!(endpoint, status = status.as_u16(), body = %body, "provider returned error status");
        return Err(classify_status(endpoint, status, &body));
    }

    let text = response
        .text()
        .await
        .map_err(|e| classify_transport(endpoint, e))?;

    serde_json::from_str(&text).map_err(|e| LlmError::ProviderServerError {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        detail: Some(format!("malformed response body: {}", e)),
    })
}

/// Map a reqwest transport failure onto the taxonomy
fn classify_transport(endpoint: &str, err: reqwest::Error) -> LlmError {
    if let Some(status) = err.status() {
        return classify_status(endpoint, status, "");
    }

    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };

    LlmError::ConnectionError {
        endpoint: endpoint.to_string(),
        reason,
    }
}

/// Map a non-2xx status onto the taxonomy
pub(crate) fn classify_status(endpoint: &str, status: StatusCode, body: &str) -> LlmError {
    if status.is_server_error() {
        LlmError::ProviderServerError {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail: non_empty(body),
        }
    } else {
        // 4xx, plus any unexpected informational/redirect status, means the
        // request or its configuration is wrong
        LlmError::ClientRequestError {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: provider_error_message(body),
        }
    }
}

/// Extract `error.message` from a provider error body
fn provider_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::String(message) => non_empty(message),
        error => error
            .get("message")
            .and_then(|m| m.as_str())
            .and_then(non_empty),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_4xx_extracts_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_status("https://x/v1", StatusCode::BAD_REQUEST, body);
        match err {
            LlmError::ClientRequestError {
                status, message, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message.as_deref(),
                    Some("API key not valid. Please pass a valid API key.")
                );
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_classify_4xx_with_string_error() {
        let err = classify_status(
            "http://x",
            StatusCode::NOT_FOUND,
            r#"{"error":"Unexpected endpoint or method."}"#,
        );
        assert!(matches!(
            err,
            LlmError::ClientRequestError { status: 404, message: Some(ref m), .. }
                if m == "Unexpected endpoint or method."
        ));
    }

    #[test]
    fn test_classify_4xx_without_json() {
        let err = classify_status("http://x", StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(
            err,
            LlmError::ClientRequestError {
                status: 401,
                message: None,
                ..
            }
        ));
    }

    #[test]
    fn test_classify_5xx() {
        let err = classify_status("http://x", StatusCode::BAD_GATEWAY, "");
        assert!(matches!(
            err,
            LlmError::ProviderServerError {
                status: 502,
                detail: None,
                ..
            }
        ));
    }

    /// Serve one request, answering with a 500 whose body is cut short
    async fn truncated_error_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if received.len() >= header_end + 4 + length {
                        break;
                    }
                }
            }
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/v1/chat/completions", addr)
    }

    #[tokio::test]
    async fn test_unreadable_error_body_still_classifies_status() {
        let endpoint = truncated_error_server().await;
        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&endpoint).unwrap();

        let result: Result<serde_json::Value, LlmError> = post_json(
            &client,
            url,
            &endpoint,
            None,
            &serde_json::json!({ "messages": [] }),
        )
        .await;

        assert!(matches!(
            result,
            Err(LlmError::ProviderServerError {
                status: 500,
                detail: None,
                ..
            })
        ));
    }
}
