use axum::http::{HeaderValue, Method};
use loggate_core::config::CorsConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

/// Cross-origin layer for the whole API.
///
/// A `"*"` origin or method is served by echoing what the request asks for.
/// Request headers are always echoed. Literal wildcards cannot be combined
/// with credentials.
pub fn layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|o| {
            HeaderValue::from_str(o)
                .inspect_err(|_| warn!(origin = %o, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    let methods = if config.allowed_methods.iter().any(|m| m == "*") {
        AllowMethods::mirror_request()
    } else {
        AllowMethods::list(config.allowed_methods.iter().filter_map(|m| {
            m.parse::<Method>()
                .inspect_err(|_| warn!(method = %m, "Ignoring invalid CORS method"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}
