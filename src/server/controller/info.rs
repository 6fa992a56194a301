use std::path::Path;

use axum::{
    extract::{OriginalUri, State},
    response::{Html, IntoResponse},
    Json,
};

use crate::server::{error::AppError, router::ApiDoc, state::AppState};

/// GET / - Liveness text for the server.
pub async fn root() -> &'static str {
    "CLANS-NODE-APP is running"
}

/// GET /api - Liveness text for the API.
pub async fn api_root() -> &'static str {
    "CLANS-NODE-APP API is running"
}

/// GET /api/v1/dev - Liveness text for the v1 API.
pub async fn api_v1_dev() -> &'static str {
    "CLANS-NODE-APP API v1 is running"
}

/// GET /privacyPolicy - Serves `privacyPolicy.html` from the static directory.
pub async fn privacy_policy(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, AppError> {
    static_page(&state.config.static_dir, "privacyPolicy.html", &uri.to_string()).await
}

/// GET /termsOfService - Serves `termsOfService.html` from the static directory.
pub async fn terms_of_service(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, AppError> {
    static_page(&state.config.static_dir, "termsOfService.html", &uri.to_string()).await
}

/// GET /api/openapi.json - OpenAPI document of the user and clan routes.
pub async fn openapi() -> impl IntoResponse {
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Cannot find {} on this server", uri))
}

async fn static_page(dir: &Path, file: &str, uri: &str) -> Result<Html<String>, AppError> {
    match tokio::fs::read_to_string(dir.join(file)).await {
        Ok(html) => Ok(Html(html)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Static page {} is missing from {}", file, dir.display());
            Err(AppError::NotFound(format!("Cannot find {} on this server", uri)))
        }
        Err(err) => Err(err.into()),
    }
}
