use async_trait::async_trait;
use bytes::Bytes;
use loggate_core::BackendError;

/// Search backend body, exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// `Content-Type` the backend answered with, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Document store reachable through an index / search / ping protocol.
///
/// One instance is built at startup and shared by every request handler.
/// Implementations must not retry: a failed call is reported as-is.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Store one JSON document in `index`. The backend assigns the id.
    async fn index_document(&self, index: &str, document: Vec<u8>) -> Result<(), BackendError>;

    /// Run a query DSL document against `index_pattern` and hand back the
    /// raw response body.
    async fn search(&self, index_pattern: &str, query: Vec<u8>) -> Result<RawResponse, BackendError>;

    /// Liveness check.
    async fn ping(&self) -> Result<(), BackendError>;
}
