//! Route tables.
//!
//! Each function returns the routes of one group, relative to the prefix the
//! group is mounted under. `app::route_groups` decides the prefixes and order.

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use crate::{
    model::{
        api::{ErrorEnvelope, MessageDto},
        clan::{
            ClanDto, ClanMemberDto, ClanSummaryDto, CreateClanDto, PaginatedClansDto,
            UpdateClanDto,
        },
        user::{PublicUserDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::{auth, clan, info, user},
        state::AppState,
    },
};

/// OpenAPI document for the user and clan groups.
#[derive(OpenApi)]
#[openapi(
    info(title = "CLANS-NODE-APP API"),
    paths(
        user::get_me,
        user::update_me,
        user::delete_me,
        user::get_user,
        clan::list_clans,
        clan::create_clan,
        clan::get_clan,
        clan::update_clan,
        clan::delete_clan,
        clan::join_clan,
        clan::leave_clan,
        clan::get_members,
    ),
    components(schemas(
        ErrorEnvelope,
        MessageDto,
        UserDto,
        PublicUserDto,
        UpdateUserDto,
        ClanDto,
        ClanSummaryDto,
        ClanMemberDto,
        PaginatedClansDto,
        CreateClanDto,
        UpdateClanDto,
    )),
    tags(
        (name = "user", description = "User profiles"),
        (name = "clan", description = "Clans and memberships")
    )
)]
pub struct ApiDoc;

/// Liveness texts, legal pages and the OpenAPI document.
pub fn base() -> Router<AppState> {
    Router::new()
        .route("/", get(info::root))
        .route("/api", get(info::api_root))
        .route("/api/v1/dev", get(info::api_v1_dev))
        .route("/api/openapi.json", get(info::openapi))
        .route("/privacyPolicy", get(info::privacy_policy))
        .route("/termsOfService", get(info::terms_of_service))
}

pub fn twitter_auth() -> Router<AppState> {
    Router::new()
        .route("/twitter", get(auth::twitter_login))
        .route("/twitter/callback", get(auth::twitter_callback))
}

pub fn google_auth() -> Router<AppState> {
    Router::new()
        .route("/google", get(auth::google_login))
        .route("/google/callback", get(auth::google_callback))
}

pub fn apple_auth() -> Router<AppState> {
    Router::new()
        .route("/apple", get(auth::apple_login))
        .route("/apple/callback", post(auth::apple_callback))
}

/// Provider-independent session routes.
pub fn session_auth() -> Router<AppState> {
    Router::new()
        .route("/logout", post(auth::logout))
        .route("/status", get(auth::status))
}

pub fn user() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(user::get_me)
                .put(user::update_me)
                .delete(user::delete_me),
        )
        .route("/{id}", get(user::get_user))
}

pub fn clans() -> Router<AppState> {
    Router::new()
        .route("/", get(clan::list_clans).post(clan::create_clan))
        .route(
            "/{id}",
            get(clan::get_clan)
                .put(clan::update_clan)
                .delete(clan::delete_clan),
        )
        .route("/{id}/join", post(clan::join_clan))
        .route("/{id}/leave", post(clan::leave_clan))
        .route("/{id}/members", get(clan::get_members))
}
