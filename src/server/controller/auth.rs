//! OAuth login, callback, logout and status handlers.
//!
//! Every provider follows the same flow:
//! 1. The login route stores a CSRF state (and for Twitter a PKCE verifier) in the
//!    session and redirects to the provider
//! 2. The callback route consumes the stored state, exchanges the code, signs the
//!    user in and returns their profile
//!
//! Routes of a provider without credentials answer 503.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};
use oauth2::PkceCodeVerifier;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ApiResponse, api::MessageDto, auth::AuthStatusDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        extract::{AppForm, AppQuery},
        middleware::{
            auth::MaybeUser,
            session::{AuthSession, OAuthFlowSession},
        },
        model::{oauth::Provider, user::User},
        service::{
            oauth::{
                apple::AppleAuthService, google::GoogleAuthService, twitter::TwitterAuthService,
                CallbackParams,
            },
            user::UserService,
        },
        state::AppState,
    },
};

/// Query string of a GET callback.
#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl From<CallbackQuery> for CallbackParams {
    fn from(query: CallbackQuery) -> Self {
        Self {
            code: query.code,
            state: query.state,
            error: query.error,
        }
    }
}

/// Form body of Apple's `form_post` callback.
#[derive(Deserialize)]
pub struct AppleCallbackForm {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    /// JSON with the user's name, only sent on the first sign-in.
    pub user: Option<String>,
}

/// GET /api/auth/twitter - Redirects to Twitter's authorize page.
pub async fn twitter_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .twitter
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Twitter))?;

    let (url, csrf_token, pkce_verifier) =
        TwitterAuthService::new(&state.http_client, oauth_client).login_url();

    let flow = OAuthFlowSession::new(&session);
    flow.set_csrf_token(Provider::Twitter, csrf_token.secret())
        .await?;
    flow.set_pkce_verifier(pkce_verifier.secret()).await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /api/auth/twitter/callback - Completes a Twitter sign-in.
///
/// # Returns
/// - `200 OK` - Signed-in user's profile
/// - `400 Bad Request` - CSRF state mismatch, missing code or PKCE verifier
/// - `401 Unauthorized` - Sign-in denied or code exchange failed
/// - `503 Service Unavailable` - Twitter is not configured
pub async fn twitter_callback(
    State(state): State<AppState>,
    session: Session,
    AppQuery(query): AppQuery<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .twitter
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Twitter))?;
    let params = CallbackParams::from(query);

    let flow = OAuthFlowSession::new(&session);
    flow.validate_csrf(Provider::Twitter, params.state.as_deref())
        .await?;
    let pkce_verifier = flow
        .take_pkce_verifier()
        .await?
        .ok_or(AuthError::MissingPkceVerifier(Provider::Twitter))?;
    let code = params.authorization_code(Provider::Twitter)?;

    let profile = TwitterAuthService::new(&state.http_client, oauth_client)
        .callback(code, PkceCodeVerifier::new(pkce_verifier))
        .await?;

    let user = UserService::new(&state.db).sign_in(&profile).await?;

    complete_login(&session, user).await
}

/// GET /api/auth/google - Redirects to Google's consent page.
pub async fn google_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .google
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Google))?;

    let (url, csrf_token) = GoogleAuthService::new(&state.http_client, oauth_client).login_url();

    OAuthFlowSession::new(&session)
        .set_csrf_token(Provider::Google, csrf_token.secret())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /api/auth/google/callback - Completes a Google sign-in.
///
/// # Returns
/// - `200 OK` - Signed-in user's profile
/// - `400 Bad Request` - CSRF state mismatch or missing code
/// - `401 Unauthorized` - Sign-in denied or code exchange failed
/// - `503 Service Unavailable` - Google is not configured
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    AppQuery(query): AppQuery<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .google
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Google))?;
    let params = CallbackParams::from(query);

    OAuthFlowSession::new(&session)
        .validate_csrf(Provider::Google, params.state.as_deref())
        .await?;
    let code = params.authorization_code(Provider::Google)?;

    let profile = GoogleAuthService::new(&state.http_client, oauth_client)
        .callback(code)
        .await?;

    let user = UserService::new(&state.db).sign_in(&profile).await?;

    complete_login(&session, user).await
}

/// GET /api/auth/apple - Redirects to Apple's authorize page.
pub async fn apple_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .apple
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Apple))?;

    let (url, csrf_token) = AppleAuthService::new(&state.http_client, oauth_client).login_url();

    OAuthFlowSession::new(&session)
        .set_csrf_token(Provider::Apple, csrf_token.secret())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// POST /api/auth/apple/callback - Completes a Sign in with Apple.
///
/// # Returns
/// - `200 OK` - Signed-in user's profile
/// - `400 Bad Request` - CSRF state mismatch or missing code
/// - `401 Unauthorized` - Sign-in denied, code exchange failed or invalid id_token
/// - `503 Service Unavailable` - Apple is not configured
pub async fn apple_callback(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<AppleCallbackForm>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth
        .apple
        .as_ref()
        .ok_or(AuthError::ProviderNotConfigured(Provider::Apple))?;
    let params = CallbackParams {
        code: form.code,
        state: form.state,
        error: form.error,
    };

    OAuthFlowSession::new(&session)
        .validate_csrf(Provider::Apple, params.state.as_deref())
        .await?;
    let code = params.authorization_code(Provider::Apple)?;

    let profile = AppleAuthService::new(&state.http_client, oauth_client)
        .callback(code, form.user.as_deref())
        .await?;

    let user = UserService::new(&state.db).sign_in(&profile).await?;

    complete_login(&session, user).await
}

/// POST /api/auth/logout - Ends the session.
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).logout().await?;

    Ok(Json(MessageDto::new("Logged out successfully")))
}

/// GET /api/auth/status - Reports whether the session is signed in.
pub async fn status(MaybeUser(user): MaybeUser) -> impl IntoResponse {
    Json(ApiResponse::new(AuthStatusDto {
        authenticated: user.is_some(),
        user: user.map(User::into_dto),
    }))
}

async fn complete_login(
    session: &Session,
    user: User,
) -> Result<Json<ApiResponse<UserDto>>, AppError> {
    AuthSession::new(session).login(user.id).await?;

    Ok(Json(ApiResponse::new(user.into_dto())))
}
