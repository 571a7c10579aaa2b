use super::ApiError;
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use loggate_core::partition::ALL_PARTITIONS;
use loggate_core::{IndexName, LogEntry, LoggateError, QueryDocument, SearchRequest};
use loggate_observability::Operation;
use serde_json::{Value, json};
use tracing::{debug, error};

/// `POST /api/logs` — store one log entry in today's partition.
pub async fn ingest_log(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let mut entry = LogEntry::from_slice(&body).map_err(LoggateError::Decode)?;

    let now = (state.clock)();
    entry.normalize_timestamp(now);
    let index = IndexName::at(now);

    let document = serde_json::to_vec(&entry).map_err(LoggateError::Encode)?;

    if let Err(e) = state.backend.index_document(index.as_str(), document).await {
        error!(index = %index, error = %e, "Failed to index log entry");
        state.metrics.record_backend_error(Operation::Ingest);
        return Err(LoggateError::from(e).into());
    }

    debug!(index = %index, level = %entry.level, source = %entry.source, "Log entry indexed");
    Ok(Json(json!({ "status": "success" })))
}

/// `POST /api/logs/search` — run the query over every partition and relay
/// the backend's response body untouched.
pub async fn search_logs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = SearchRequest::from_slice(&body).map_err(LoggateError::Decode)?;

    let query = QueryDocument::build(&request);
    let payload = query.to_vec().map_err(LoggateError::Encode)?;

    let raw = match state.backend.search(ALL_PARTITIONS, payload).await {
        Ok(raw) => raw,
        Err(e) => {
            error!(pattern = ALL_PARTITIONS, error = %e, "Search failed");
            state.metrics.record_backend_error(Operation::Search);
            return Err(LoggateError::from(e).into());
        }
    };

    let content_type = raw
        .content_type
        .unwrap_or_else(|| "application/json".to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], raw.body).into_response())
}
