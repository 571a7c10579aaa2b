pub mod health;
pub mod logs;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use loggate_core::LoggateError;

/// Handler error. Rendered as a plain-text body with the mapped status.
#[derive(Debug)]
pub struct ApiError(pub LoggateError);

impl From<LoggateError> for ApiError {
    fn from(err: LoggateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.0.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}
