//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. Every failure, whatever its origin, is
//! converted into an `AppError` before it leaves a handler. `AppError::into_response`
//! only sets the status code and attaches an [`ErrorReport`]; the terminal middleware
//! in [`handler`] turns that report into the JSON envelope so that environment-gated
//! details are decided in one place.

pub mod auth;
pub mod config;
pub mod handler;
pub mod internal;

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{auth::AuthError, config::ConfigError, internal::InternalError};

/// Generic message returned to clients for 5xx errors.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic conversion with `?`. The status code is
/// explicit per variant (see [`AppError::status_code`]); anything without a more
/// specific mapping is a 500 Internal Server Error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates status and message to `AuthError`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Unexpected internal condition such as a handler panic.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Filesystem or socket error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed JSON body, wrong content type or schema mismatch.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Malformed URL-encoded body.
    #[error(transparent)]
    FormRejection(#[from] FormRejection),

    /// Path parameter failed to parse.
    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    /// Query string failed to parse.
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    /// Request payload failed field validation.
    #[error(transparent)]
    ValidationErr(#[from] validator::ValidationErrors),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Request conflicts with the current state of a resource.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP status code the error maps to. Defaults to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthErr(err) => err.status_code(),
            Self::JsonRejection(rejection) => rejection.status(),
            Self::FormRejection(rejection) => rejection.status(),
            Self::PathRejection(rejection) => rejection.status(),
            Self::QueryRejection(rejection) => rejection.status(),
            Self::ValidationErr(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    ///
    /// Client errors carry their own message. Server errors return a generic
    /// message so database or provider details never reach the response body.
    pub fn client_message(&self) -> String {
        match self {
            Self::AuthErr(err) => err.client_message(),
            Self::JsonRejection(rejection) => rejection.body_text(),
            Self::FormRejection(rejection) => rejection.body_text(),
            Self::PathRejection(rejection) => rejection.body_text(),
            Self::QueryRejection(rejection) => rejection.body_text(),
            Self::ValidationErr(_)
            | Self::NotFound(_)
            | Self::BadRequest(_)
            | Self::Conflict(_) => self.to_string(),
            _ => UNEXPECTED_ERROR.to_string(),
        }
    }
}

/// Details of a failed request, carried from the handler to the error renderer
/// in the response extensions.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Client-facing message.
    pub message: String,
    /// Full error including its chain of causes. Only exposed in development.
    pub detail: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Builds a report from any error, walking its `source()` chain.
    pub fn from_error(message: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(message, cause_chain(err))
    }
}

/// Renders an error and all of its sources, one per line.
///
/// Falls back to the `Debug` representation when the error displays as an
/// empty string, so the result is never empty.
pub fn cause_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        chain.push_str("\n    caused by: ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }

    if chain.trim().is_empty() {
        format!("{:?}", err)
    } else {
        chain
    }
}

/// Converts application errors into HTTP responses.
///
/// Only the status code is set here. The body is produced by
/// [`handler::render_errors`], which reads the attached [`ErrorReport`].
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let report = ErrorReport::from_error(self.client_message(), &self);

        let mut response = status.into_response();
        response.extensions_mut().insert(report);
        response
    }
}
