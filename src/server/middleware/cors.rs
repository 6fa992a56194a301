use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Allows any origin with the common methods and any request headers.
///
/// Credentials are not allowed alongside a wildcard origin, so browsers on other
/// origins call the API without the session cookie.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
