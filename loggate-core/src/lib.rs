pub mod config;
pub mod error;
pub mod model;
pub mod partition;
pub mod query;
pub mod timestamp;

pub use config::GatewayConfig;
pub use error::{BackendError, LoggateError};
pub use model::{LogEntry, SearchRequest};
pub use partition::IndexName;
pub use query::QueryDocument;

use chrono::{DateTime, Utc};

/// Wall-clock source. Handlers receive one so partitioning can be pinned in tests.
pub type Clock = fn() -> DateTime<Utc>;
