pub mod cors;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{ApiServer, AppState, build_router};
