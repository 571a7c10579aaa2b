// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Loggate — log ingestion & search gateway
//
//  HTTP surface: axum on tokio
//  Storage:      OpenSearch, one index per UTC day
//  Config:       YAML file + LOGGATE_* / OPENSEARCH_* env
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::Parser;
use loggate_api::{ApiServer, AppState};
use loggate_core::GatewayConfig;
use loggate_observability::{LogFormat, MetricsCollector, init_tracing};
use loggate_store::OpenSearchBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "loggate", version, about = "Loggate — log ingestion & search gateway")]
struct Cli {
    /// Path to configuration file (optional; env vars apply either way)
    #[arg(short, long, default_value = "/etc/loggate/loggate.yaml")]
    config: PathBuf,

    /// Log level, overrides `observability.log_level`
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format: text or json
    #[arg(long, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Config ──
    let config = GatewayConfig::load(&cli.config)?;

    // ── Tracing ──
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_tracing(level, cli.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Loggate starting");
    if cli.config.exists() {
        info!(path = %cli.config.display(), "Loaded config file");
    } else {
        info!(path = %cli.config.display(), "No config file found, using defaults and environment");
    }

    // ── Search backend ──
    let backend = OpenSearchBackend::new(&config.backend)?;

    // ── Metrics ──
    let metrics = MetricsCollector::new(config.observability.prometheus.enabled)?;
    if metrics.is_enabled() {
        info!(path = %config.observability.prometheus.path, "Prometheus metrics enabled");
    }

    let state = AppState::new(Arc::new(backend), Arc::new(metrics));

    ApiServer::new(config, state)
        .start(shutdown_signal())
        .await?;

    info!("Loggate stopped");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM (docker stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
