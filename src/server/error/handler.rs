//! Terminal error rendering.
//!
//! `render_errors` is the outermost middleware of the application. Every response
//! with a 4xx or 5xx status passes through it and leaves as the JSON envelope
//! `{ "success": false, "message": ..., "error": ... }`. The `error` field carries the
//! error's cause chain and is only present in development.

use std::any::Any;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    model::api::ErrorEnvelope,
    server::{
        config::Environment,
        error::{internal::InternalError, AppError, ErrorReport, UNEXPECTED_ERROR},
    },
};

/// Upper bound on how much of a foreign error body is read to recover its message.
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites error responses into the JSON error envelope.
///
/// Responses produced by `AppError` carry an [`ErrorReport`] extension. Error
/// responses produced elsewhere, such as unmapped extractor rejections or the
/// panic layer, are converted as well, using their plain-text body
/// or the status' canonical reason as the message. JSON error bodies without a
/// report are left untouched.
pub async fn render_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    let report = match parts.extensions.remove::<ErrorReport>() {
        Some(report) => report,
        None => {
            if is_json(&parts.headers) {
                return Response::from_parts(parts, body);
            }

            let text = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
                Err(_) => String::new(),
            };
            let message = if !text.is_empty() {
                text
            } else {
                status
                    .canonical_reason()
                    .unwrap_or(UNEXPECTED_ERROR)
                    .to_string()
            };

            ErrorReport::new(message.clone(), message)
        }
    };

    if status.is_server_error() {
        tracing::error!("Error: {}", report.detail);
    } else {
        tracing::warn!("Error: {}", report.message);
    }

    let envelope = ErrorEnvelope {
        success: false,
        message: report.message,
        error: environment.is_development().then_some(report.detail),
    };

    let body = match serde_json::to_vec(&envelope) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Failed to serialize error envelope: {}", err);
            br#"{"success":false,"message":"An unexpected error occurred"}"#.to_vec()
        }
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}

/// Converts a caught panic into a 500 response carrying an [`ErrorReport`].
///
/// Used with `tower_http::catch_panic::CatchPanicLayer`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::from(InternalError::HandlerPanicked(detail)).into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
