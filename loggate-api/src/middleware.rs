use crate::server::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use loggate_observability::{AccessLogEntry, Operation};
use std::time::Instant;

/// Access log + request metrics for every request, matched or not.
pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let operation = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(Operation::Other, |p| operation_for(p.as_str(), &method));

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    let status = response.status().as_u16();
    state.metrics.record_request(operation, status, elapsed);
    AccessLogEntry::new(method.as_str(), &uri, status, elapsed * 1000.0).emit();

    response
}

fn operation_for(route: &str, method: &Method) -> Operation {
    match (route, method) {
        ("/api/logs", &Method::POST) => Operation::Ingest,
        ("/api/logs/search", &Method::POST) => Operation::Search,
        ("/api/health", &Method::GET) => Operation::Health,
        _ => Operation::Other,
    }
}
