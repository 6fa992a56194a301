//! Authentication guard and user extractors.
//!
//! `rehydrate_user` runs inside the session layer on every request. It resolves
//! the user ID stored in the session to a `User` and attaches it to the request
//! as [`CurrentUser`]. Handlers then use [`AuthUser`] to require a signed-in user
//! or [`MaybeUser`] when signing in is optional.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
    state::AppState,
};

/// The signed-in user, stored in the request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the session's user.
    ///
    /// A user ID pointing at a deleted user is removed from the session.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - A user is signed in
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError)` - Session or database failure
    pub async fn current(&self) -> Result<Option<User>, AppError> {
        let auth_session = AuthSession::new(self.session);

        let Some(user_id) = auth_session.get_user_id().await? else {
            return Ok(None);
        };

        let user = UserRepository::new(self.db).find_by_id(user_id).await?;
        if user.is_none() {
            tracing::debug!("Removing unknown user {} from session", user_id);
            auth_session.remove_user_id().await?;
        }

        Ok(user)
    }

    /// Resolves the session's user, failing for anonymous sessions.
    ///
    /// # Returns
    /// - `Ok(User)` - The signed-in user
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Nobody is signed in
    pub async fn require(&self) -> Result<User, AppError> {
        self.current()
            .await?
            .ok_or_else(|| AuthError::UserNotInSession.into())
    }
}

/// Attaches the signed-in user, if any, to the request.
pub async fn rehydrate_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(user) = AuthGuard::new(&state.db, &session).current().await? {
        request.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(request).await)
}

/// Extractor for handlers that require a signed-in user. Rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|CurrentUser(user)| AuthUser(user.clone()))
            .ok_or_else(|| AuthError::UserNotInSession.into())
    }
}

/// Extractor for handlers where signing in is optional.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts
                .extensions
                .get::<CurrentUser>()
                .map(|CurrentUser(user)| user.clone()),
        ))
    }
}
