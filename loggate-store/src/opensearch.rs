use crate::backend::{RawResponse, SearchBackend};
use async_trait::async_trait;
use loggate_core::config::BackendConfig;
use loggate_core::{BackendError, LoggateError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use std::time::Duration;
use tracing::{debug, info};

/// OpenSearch / Elasticsearch REST client.
///
/// Wraps a single `reqwest::Client`; its connection pool is the only state
/// shared between requests.
pub struct OpenSearchBackend {
    client: Client,
    base: String,
    username: Option<String>,
    password: Option<String>,
}

impl OpenSearchBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, LoggateError> {
        let url = Url::parse(&config.url)
            .map_err(|e| LoggateError::Config(format!("invalid backend url {:?}: {e}", config.url)))?;

        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| LoggateError::Config(format!("backend client: {e}")))?;

        info!(url = %url, auth = config.username.is_some(), "Search backend configured");

        Ok(Self {
            client,
            base: url.as_str().trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, format!("{}/{}", self.base, path));
        match &self.username {
            Some(user) => req.basic_auth(user, self.password.as_deref()),
            None => req,
        }
    }
}

#[async_trait]
impl SearchBackend for OpenSearchBackend {
    async fn index_document(&self, index: &str, document: Vec<u8>) -> Result<(), BackendError> {
        let resp = self
            .request(Method::POST, &format!("{index}/_doc"))
            .header(CONTENT_TYPE, "application/json")
            .body(document)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await?;
        debug!(index, "Document indexed");
        Ok(())
    }

    async fn search(&self, index_pattern: &str, query: Vec<u8>) -> Result<RawResponse, BackendError> {
        let resp = self
            .request(Method::POST, &format!("{index_pattern}/_search"))
            .header(CONTENT_TYPE, "application/json")
            .body(query)
            .send()
            .await
            .map_err(transport)?;
        let resp = check_status(resp).await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(transport)?;

        Ok(RawResponse { content_type, body })
    }

    async fn ping(&self) -> Result<(), BackendError> {
        let resp = self
            .request(Method::HEAD, "")
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await?;
        Ok(())
    }
}

async fn check_status(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Status { status, body })
}

/// Flatten the error and its causes; reqwest hides the interesting part
/// (DNS, refused connection) in the source chain.
fn transport(err: reqwest::Error) -> BackendError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    BackendError::Transport(message)
}
