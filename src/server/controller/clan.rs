use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorEnvelope, MessageDto},
        clan::{ClanDto, ClanMemberDto, CreateClanDto, PaginatedClansDto, UpdateClanDto},
    },
    server::{
        error::AppError,
        extract::{AppPath, AppQuery, ValidJson},
        middleware::auth::AuthUser,
        model::clan::{ClanMember, CreateClanParam, UpdateClanParam},
        service::clan::ClanService,
        state::AppState,
    },
};

pub static CLAN_TAG: &str = "clan";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Zero-indexed page number.
    #[serde(default)]
    pub page: u64,
    /// Clans per page, between 1 and 100.
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// GET /api/clans - Lists clans with their member counts.
///
/// Clans are ordered by name. Anyone may list clans.
///
/// # Returns
/// - `200 OK` - Page of clans with total count and page count
/// - `400 Bad Request` - `entries` out of range or malformed query
#[utoipa::path(
    get,
    path = "/api/clans",
    tag = CLAN_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of clans", body = ApiResponse<PaginatedClansDto>),
        (status = 400, description = "Invalid pagination", body = ErrorEnvelope)
    ),
)]
pub async fn list_clans(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let clans = ClanService::new(&state.db)
        .list(params.page, params.entries)
        .await?;

    Ok(Json(ApiResponse::new(clans.into_dto())))
}

/// POST /api/clans - Creates a clan owned by the signed-in user.
///
/// # Access Control
/// The user must be signed in and must not already belong to a clan.
///
/// # Returns
/// - `201 Created` - The new clan with its owner as sole member
/// - `400 Bad Request` - Payload failed validation
/// - `401 Unauthorized` - Not signed in
/// - `409 Conflict` - Already in a clan or the name is taken
#[utoipa::path(
    post,
    path = "/api/clans",
    tag = CLAN_TAG,
    request_body = CreateClanDto,
    responses(
        (status = 201, description = "Clan created", body = ApiResponse<ClanDto>),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 409, description = "Already in a clan or name taken", body = ErrorEnvelope)
    ),
)]
pub async fn create_clan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<CreateClanDto>,
) -> Result<impl IntoResponse, AppError> {
    let clan = ClanService::new(&state.db)
        .create(CreateClanParam::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(clan.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/clans/{id}",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    responses(
        (status = 200, description = "Clan with members", body = ApiResponse<ClanDto>),
        (status = 404, description = "Clan not found", body = ErrorEnvelope)
    ),
)]
pub async fn get_clan(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let clan = ClanService::new(&state.db).get(id).await?;

    Ok(Json(ApiResponse::new(clan.into_dto())))
}

/// PUT /api/clans/{id} - Renames a clan or changes its description.
///
/// # Access Control
/// Only the clan's owner may update it.
///
/// # Returns
/// - `200 OK` - The updated clan
/// - `400 Bad Request` - Payload failed validation
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Not the owner
/// - `404 Not Found` - Clan not found
/// - `409 Conflict` - The new name is taken
#[utoipa::path(
    put,
    path = "/api/clans/{id}",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    request_body = UpdateClanDto,
    responses(
        (status = 200, description = "Clan updated", body = ApiResponse<ClanDto>),
        (status = 400, description = "Invalid payload", body = ErrorEnvelope),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 403, description = "Not the owner", body = ErrorEnvelope),
        (status = 404, description = "Clan not found", body = ErrorEnvelope),
        (status = 409, description = "Name taken", body = ErrorEnvelope)
    ),
)]
pub async fn update_clan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<i32>,
    ValidJson(payload): ValidJson<UpdateClanDto>,
) -> Result<impl IntoResponse, AppError> {
    let clan = ClanService::new(&state.db)
        .update(user.id, id, UpdateClanParam::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::new(clan.into_dto())))
}

/// DELETE /api/clans/{id} - Disbands a clan, removing all memberships.
///
/// # Access Control
/// Only the clan's owner may delete it.
#[utoipa::path(
    delete,
    path = "/api/clans/{id}",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    responses(
        (status = 200, description = "Clan deleted", body = MessageDto),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 403, description = "Not the owner", body = ErrorEnvelope),
        (status = 404, description = "Clan not found", body = ErrorEnvelope)
    ),
)]
pub async fn delete_clan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    ClanService::new(&state.db).delete(user.id, id).await?;

    Ok(Json(MessageDto::new("Clan deleted successfully")))
}

/// POST /api/clans/{id}/join - Joins a clan as a member.
///
/// # Returns
/// - `200 OK` - The clan with the new member
/// - `401 Unauthorized` - Not signed in
/// - `404 Not Found` - Clan not found
/// - `409 Conflict` - Already in a clan
#[utoipa::path(
    post,
    path = "/api/clans/{id}/join",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    responses(
        (status = 200, description = "Joined clan", body = ApiResponse<ClanDto>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 404, description = "Clan not found", body = ErrorEnvelope),
        (status = 409, description = "Already in a clan", body = ErrorEnvelope)
    ),
)]
pub async fn join_clan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let clan = ClanService::new(&state.db).join(user.id, id).await?;

    Ok(Json(ApiResponse::new(clan.into_dto())))
}

/// POST /api/clans/{id}/leave - Leaves a clan.
///
/// The owner cannot leave; they delete the clan instead.
#[utoipa::path(
    post,
    path = "/api/clans/{id}/leave",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    responses(
        (status = 200, description = "Left clan", body = MessageDto),
        (status = 400, description = "Not a member or owner", body = ErrorEnvelope),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 404, description = "Clan not found", body = ErrorEnvelope)
    ),
)]
pub async fn leave_clan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    ClanService::new(&state.db).leave(user.id, id).await?;

    Ok(Json(MessageDto::new("You have left the clan")))
}

/// GET /api/clans/{id}/members - Lists a clan's members, owner first.
#[utoipa::path(
    get,
    path = "/api/clans/{id}/members",
    tag = CLAN_TAG,
    params(("id" = i32, Path, description = "Clan ID")),
    responses(
        (status = 200, description = "Clan members", body = ApiResponse<Vec<ClanMemberDto>>),
        (status = 404, description = "Clan not found", body = ErrorEnvelope)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let members = ClanService::new(&state.db).members(id).await?;
    let members: Vec<ClanMemberDto> = members.into_iter().map(ClanMember::into_dto).collect();

    Ok(Json(ApiResponse::new(members)))
}
