//! Assembly of the HTTP pipeline.
//!
//! `build_app` receives the route groups to mount, so tests can add their own
//! groups next to the production ones.

use axum::{middleware, Router};
use time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    controller::info,
    error::handler::{handle_panic, render_errors},
    middleware::{auth::rehydrate_user, cors::cors_layer, logging::log_request},
    router,
    startup::session_key,
    state::AppState,
};

pub const SESSION_COOKIE_NAME: &str = "clans.sid";

const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Routes mounted under a path prefix.
pub struct RouteGroup {
    pub prefix: &'static str,
    pub router: Router<AppState>,
}

impl RouteGroup {
    pub fn new(prefix: &'static str, router: Router<AppState>) -> Self {
        Self { prefix, router }
    }
}

/// Production route groups in mount order.
pub fn route_groups() -> Vec<RouteGroup> {
    vec![
        RouteGroup::new("/api/auth", router::twitter_auth()),
        RouteGroup::new("/api/user", router::user()),
        RouteGroup::new("/api/auth", router::google_auth()),
        RouteGroup::new("/api/auth", router::apple_auth()),
        RouteGroup::new("/api/auth", router::session_auth()),
        RouteGroup::new("/api/clans", router::clans()),
    ]
}

/// Merges groups that share a prefix, keeping the order of first occurrence.
///
/// Axum rejects nesting two routers at the same path, so every prefix must be
/// nested exactly once.
pub fn merge_groups(groups: Vec<RouteGroup>) -> Vec<RouteGroup> {
    let mut merged: Vec<RouteGroup> = Vec::new();

    for group in groups {
        match merged.iter_mut().find(|existing| existing.prefix == group.prefix) {
            Some(existing) => {
                let router = std::mem::take(&mut existing.router);
                existing.router = router.merge(group.router);
            }
            None => merged.push(group),
        }
    }

    merged
}

/// Builds the application router.
///
/// Layers from outermost to innermost:
/// 1. Error renderer, turning every error response into the JSON envelope
/// 2. Panic catcher
/// 3. CORS
/// 4. Request logging
/// 5. Session
/// 6. Principal rehydration
///
/// Unmatched paths and unsupported methods fall through to the 404 handler.
pub fn build_app(state: AppState, session_store: SqliteStore, groups: Vec<RouteGroup>) -> Router {
    let environment = state.config.environment.clone();
    let is_production = environment.is_production();

    // Apple posts its callback cross-site, which a Lax cookie does not survive.
    let same_site = if is_production {
        SameSite::None
    } else {
        SameSite::Lax
    };

    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(is_production)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)))
        .with_signed(session_key(&state.config.session_secret));

    // A known path with an unsupported method is reported as not found.
    let mut app = router::base().method_not_allowed_fallback(info::not_found);
    for group in merge_groups(groups) {
        let router = group.router.method_not_allowed_fallback(info::not_found);
        app = app.nest(group.prefix, router);
    }

    app.fallback(info::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rehydrate_user))
        .layer(session_layer)
        .layer(middleware::from_fn(log_request))
        .layer(cors_layer())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(environment, render_errors))
        .with_state(state)
}

#[cfg(test)]
mod test;
