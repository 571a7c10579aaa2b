pub mod access_log;
pub mod logger;

#[cfg(feature = "prometheus")]
pub mod metrics;

pub use access_log::AccessLogEntry;
pub use logger::{LogFormat, init_tracing};

#[cfg(feature = "prometheus")]
pub use metrics::{MetricsCollector, Operation, Outcome};
