use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{SecondsFormat, Utc};

/// Logs `<timestamp> - <METHOD> <path and query>` for every request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| request.uri().path());

    tracing::info!(
        "{} - {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        request.method(),
        target
    );

    next.run(request).await
}
