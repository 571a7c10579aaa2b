use crate::{cors, handlers, middleware};
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use chrono::Utc;
use loggate_core::{Clock, GatewayConfig};
use loggate_observability::MetricsCollector;
use loggate_store::SearchBackend;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub metrics: Arc<MetricsCollector>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            backend,
            metrics,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, e.g. to pin the ingest partition date.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// Build the Axum router with every route, CORS and access logging.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let mut router = Router::new()
        .route("/api/logs", post(handlers::logs::ingest_log))
        .route("/api/logs/search", post(handlers::logs::search_logs))
        .route("/api/health", get(handlers::health::health_check));

    if state.metrics.is_enabled() {
        router = router.route(&config.observability.prometheus.path, get(metrics_handler));
    }

    // Log entries and queries are accepted at any size.
    router
        .layer(DefaultBodyLimit::disable())
        .layer(cors::layer(&config.cors))
        .layer(from_fn_with_state(state.clone(), middleware::access_log))
        .with_state(state)
}

/// The HTTP server.
pub struct ApiServer {
    config: GatewayConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: GatewayConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.bind_addr();
        let app = build_router(self.state, &self.config);

        let listener = TcpListener::bind(&addr).await?;
        info!(addr = %listener.local_addr()?, "Loggate listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Prometheus metrics endpoint handler.
async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}
