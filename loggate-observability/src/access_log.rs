use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Structured access log entry, one per HTTP request.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub timestamp: String,
    pub method: String,
    pub uri: String,
    pub response_status: u16,
    pub latency_ms: f64,
}

impl AccessLogEntry {
    pub fn new(method: &str, uri: &str, response_status: u16, latency_ms: f64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            method: method.to_string(),
            uri: uri.to_string(),
            response_status,
            latency_ms,
        }
    }

    /// Write the entry through `tracing` at info level.
    pub fn emit(&self) {
        info!(
            method = %self.method,
            uri = %self.uri,
            status = self.response_status,
            latency_ms = self.latency_ms,
            "{} {} {} {:.2}ms",
            self.method,
            self.uri,
            self.response_status,
            self.latency_ms
        );
    }
}
