use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorEnvelope, MessageDto},
        user::{PublicUserDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        extract::{AppPath, ValidJson},
        middleware::{auth::AuthUser, session::AuthSession},
        model::user::UpdateUserParam,
        service::user::UserService,
        state::AppState,
    },
};

pub static USER_TAG: &str = "user";

/// GET /api/user/me - Returns the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Signed-in user's profile", body = ApiResponse<UserDto>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
)]
pub async fn get_me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(ApiResponse::new(user.into_dto()))
}

/// PUT /api/user/me - Updates the signed-in user's name or avatar.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Payload failed validation or name is blank
/// - `401 Unauthorized` - Not signed in
#[utoipa::path(
    put,
    path = "/api/user/me",
    tag = USER_TAG,
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .update_profile(user.id, UpdateUserParam::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::new(user.into_dto())))
}

/// DELETE /api/user/me - Deletes the signed-in user's account and ends the session.
///
/// # Returns
/// - `200 OK` - Account deleted
/// - `401 Unauthorized` - Not signed in
/// - `409 Conflict` - The user still owns a clan
#[utoipa::path(
    delete,
    path = "/api/user/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Account deleted", body = MessageDto),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 409, description = "User owns a clan", body = ErrorEnvelope)
    ),
)]
pub async fn delete_me(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    UserService::new(&state.db).delete_account(user.id).await?;
    AuthSession::new(&session).logout().await?;

    Ok(Json(MessageDto::new("Account deleted successfully")))
}

/// GET /api/user/{id} - Returns another user's public profile.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Public profile", body = ApiResponse<PublicUserDto>),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db).get(id).await?;

    Ok(Json(ApiResponse::new(user.into_public_dto())))
}
