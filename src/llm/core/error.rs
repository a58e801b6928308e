//! Error types for the LLM layer

use thiserror::Error;

/// Errors that can occur when calling an LLM provider
///
/// Every variant carries the configured endpoint (never the request URL,
/// which may hold a credential) so failures can be diagnosed from logs.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider needs an API key and none is configured
    #[error("Missing API key for model {model_id}")]
    MissingCredential { model_id: String },

    /// The endpoint could not be reached (refused, unreachable, DNS, timeout)
    #[error("Connection error for {endpoint}: {reason}")]
    ConnectionError { endpoint: String, reason: String },

    /// The provider rejected the request (4xx)
    #[error("Client error (status {status}) from {endpoint}")]
    ClientRequestError {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    /// The provider failed or answered with an unusable body
    #[error("Server error (status {status}) from {endpoint}")]
    ProviderServerError {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },

    /// The HTTP client itself could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl LlmError {
    /// Endpoint the failure is attributed to, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            LlmError::ConnectionError { endpoint, .. }
            | LlmError::ClientRequestError { endpoint, .. }
            | LlmError::ProviderServerError { endpoint, .. } => Some(endpoint),
            LlmError::MissingCredential { .. } | LlmError::ClientBuild(_) => None,
        }
    }

    /// HTTP status returned by the provider, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ClientRequestError { status, .. }
            | LlmError::ProviderServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message suitable for showing to the person chatting
    pub fn user_message(&self) -> String {
        match self {
            LlmError::MissingCredential { model_id } => {
                format!("API Key for {} is missing.", model_id)
            }
            LlmError::ConnectionError { endpoint, .. } => format!(
                "Failed to connect to the AI model at {}. Please ensure the AI server is running and accessible.",
                endpoint
            ),
            LlmError::ClientRequestError {
                endpoint,
                status: 404,
                ..
            } => format!(
                "AI Model Error: The API endpoint '{}' was not found (404). Please verify the model URL in your configuration.",
                endpoint
            ),
            LlmError::ClientRequestError {
                status, message, ..
            } => format!(
                "AI Model Error: Client error ({}). {}",
                status,
                message.as_deref().unwrap_or("Please check your request.")
            ),
            LlmError::ProviderServerError { status, .. } => format!(
                "AI Model Error: Server error ({}). The AI service might be temporarily unavailable.",
                status
            ),
            LlmError::ClientBuild(reason) => {
                format!("AI Model communication failed: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_message_names_endpoint() {
        let err = LlmError::ConnectionError {
            endpoint: "http://localhost:1234/v1/chat/completions".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err
            .user_message()
            .starts_with("Failed to connect to the AI model at http://localhost:1234/v1/chat/completions"));
        assert_eq!(err.endpoint(), Some("http://localhost:1234/v1/chat/completions"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_not_found_has_dedicated_message() {
        let err = LlmError::ClientRequestError {
            endpoint: "http://host/v1".to_string(),
            status: 404,
            message: Some("ignored".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "AI Model Error: The API endpoint 'http://host/v1' was not found (404). Please verify the model URL in your configuration."
        );
    }

    #[test]
    fn test_client_error_uses_provider_message() {
        let err = LlmError::ClientRequestError {
            endpoint: "http://host/v1".to_string(),
            status: 400,
            message: Some("API key not valid.".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "AI Model Error: Client error (400). API key not valid."
        );

        let err = LlmError::ClientRequestError {
            endpoint: "http://host/v1".to_string(),
            status: 401,
            message: None,
        };
        assert!(err.user_message().ends_with("Please check your request."));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_server_error_message() {
        let err = LlmError::ProviderServerError {
            endpoint: "http://host/v1".to_string(),
            status: 503,
            detail: None,
        };
        assert_eq!(
            err.user_message(),
            "AI Model Error: Server error (503). The AI service might be temporarily unavailable."
        );
    }

    #[test]
    fn test_missing_credential_message() {
        let err = LlmError::MissingCredential {
            model_id: "gemini-2.5-flash".to_string(),
        };
        assert_eq!(err.user_message(), "API Key for gemini-2.5-flash is missing.");
        assert!(err.endpoint().is_none());
    }
}
