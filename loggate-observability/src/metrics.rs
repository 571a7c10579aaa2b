//! Prometheus instruments for the gateway's three operations.
//!
//! Every request is counted under the operation it served and the outcome the
//! client saw. Failed backend calls get their own counter, so a 500 caused by
//! OpenSearch can be told apart from one caused by the gateway.

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder, exponential_buckets,
};

const NAMESPACE: &str = "loggate";

/// What a request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ingest,
    Search,
    Health,
    /// Metrics scrapes, unknown routes, CORS preflights.
    Other,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Ingest => "ingest",
            Operation::Search => "search",
            Operation::Health => "health",
            Operation::Other => "other",
        }
    }
}

/// How a request ended, as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// 1xx to 3xx.
    Ok,
    /// 4xx: the caller sent something unusable.
    Rejected,
    /// 5xx: the gateway or the backend failed.
    Failed,
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            0..=399 => Outcome::Ok,
            400..=499 => Outcome::Rejected,
            _ => Outcome::Failed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

struct Instruments {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    backend_errors: IntCounterVec,
}

impl Instruments {
    fn register() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some(NAMESPACE.to_string()), None)?;

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "Requests by operation and outcome"),
            &["operation", "outcome"],
        )?;
        // 1ms .. ~4s; a single OpenSearch round trip dominates.
        let latency = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "Request latency by operation")
                .buckets(exponential_buckets(0.001, 2.0, 13)?),
            &["operation"],
        )?;
        let backend_errors = IntCounterVec::new(
            Opts::new("backend_errors_total", "Failed search backend calls by operation"),
            &["operation"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(backend_errors.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
            backend_errors,
        })
    }
}

/// Request and backend-failure metrics. Holds nothing at all when disabled.
pub struct MetricsCollector {
    instruments: Option<Instruments>,
}

impl MetricsCollector {
    pub fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }
        Ok(Self {
            instruments: Some(Instruments::register()?),
        })
    }

    pub fn disabled() -> Self {
        Self { instruments: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.instruments.is_some()
    }

    pub fn record_request(&self, operation: Operation, status: u16, duration_secs: f64) {
        let Some(m) = &self.instruments else {
            return;
        };
        let outcome = Outcome::from_status(status);
        m.requests
            .with_label_values(&[operation.as_str(), outcome.as_str()])
            .inc();
        m.latency
            .with_label_values(&[operation.as_str()])
            .observe(duration_secs);
    }

    pub fn record_backend_error(&self, operation: Operation) {
        if let Some(m) = &self.instruments {
            m.backend_errors
                .with_label_values(&[operation.as_str()])
                .inc();
        }
    }

    /// Requests counted so far for `operation` ending in `outcome`.
    pub fn requests(&self, operation: Operation, outcome: Outcome) -> u64 {
        self.instruments.as_ref().map_or(0, |m| {
            m.requests
                .with_label_values(&[operation.as_str(), outcome.as_str()])
                .get()
        })
    }

    pub fn backend_errors(&self, operation: Operation) -> u64 {
        self.instruments.as_ref().map_or(0, |m| {
            m.backend_errors
                .with_label_values(&[operation.as_str()])
                .get()
        })
    }

    /// Text exposition of everything recorded; empty when disabled.
    pub fn render(&self) -> String {
        self.instruments
            .as_ref()
            .and_then(|m| TextEncoder::new().encode_to_string(&m.registry.gather()).ok())
            .unwrap_or_default()
    }
}
