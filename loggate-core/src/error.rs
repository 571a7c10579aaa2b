use http::StatusCode;
use thiserror::Error;

/// Failure talking to the search backend. Never retried.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout, broken body stream.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("[{status}] {body}")]
    Status { status: StatusCode, body: String },
}

/// Unified error type for Loggate request handling.
#[derive(Error, Debug)]
pub enum LoggateError {
    /// Malformed or type-mismatched JSON request body.
    #[error("{0}")]
    Decode(serde_json::Error),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Serialization error: {0}")]
    Encode(serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl LoggateError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LoggateError::Decode(_) => StatusCode::BAD_REQUEST,
            LoggateError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LoggateError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LoggateError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_is_client_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = LoggateError::Decode(err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn backend_error_is_server_error() {
        let err = LoggateError::from(BackendError::Transport("connection refused".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn status_error_display_includes_code_and_body() {
        let err = BackendError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "Unauthorized".into(),
        };
        assert_eq!(err.to_string(), "[401 Unauthorized] Unauthorized");
    }
}
