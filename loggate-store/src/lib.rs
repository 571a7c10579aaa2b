pub mod backend;
pub mod opensearch;

pub use backend::{RawResponse, SearchBackend};
pub use opensearch::OpenSearchBackend;
