//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the keys of
//! one concern:
//! - `AuthSession` - The signed-in user's ID
//! - `OAuthFlowSession` - CSRF state and PKCE verifier of an OAuth flow in progress

use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::oauth::Provider,
};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_TWITTER_PKCE_VERIFIER: &str = "oauth:twitter:pkce_verifier";

fn csrf_key(provider: Provider) -> String {
    format!("oauth:{}:csrf_token", provider.as_str())
}

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Logs the user in.
    ///
    /// The session ID is cycled first so an ID planted before login cannot be
    /// reused afterwards.
    ///
    /// # Returns
    /// - `Ok(())` - User ID stored under a fresh session ID
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn login(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.set_user_id(user_id).await
    }

    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the signed-in user's ID.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - A user is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        let user_id = self.session.get::<i32>(SESSION_AUTH_USER_ID).await?;
        Ok(user_id)
    }

    /// Removes the user ID, keeping the rest of the session.
    pub async fn remove_user_id(&self) -> Result<(), AppError> {
        self.session.remove::<i32>(SESSION_AUTH_USER_ID).await?;
        Ok(())
    }

    /// Deletes the session from the store and expires its cookie.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// OAuth flow state kept across the redirect to the provider and back.
///
/// Every value is taken exactly once: reading it also removes it.
pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the CSRF state sent to `provider`.
    pub async fn set_csrf_token(&self, provider: Provider, token: &str) -> Result<(), AppError> {
        self.session.insert(&csrf_key(provider), token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF state stored for `provider`.
    pub async fn take_csrf_token(&self, provider: Provider) -> Result<Option<String>, AppError> {
        let token = self.session.remove(&csrf_key(provider)).await?;
        Ok(token)
    }

    /// Stores the PKCE verifier of a Twitter login.
    pub async fn set_pkce_verifier(&self, verifier: &str) -> Result<(), AppError> {
        self.session
            .insert(SESSION_TWITTER_PKCE_VERIFIER, verifier)
            .await?;
        Ok(())
    }

    /// Retrieves and removes the PKCE verifier of a Twitter login.
    pub async fn take_pkce_verifier(&self) -> Result<Option<String>, AppError> {
        let verifier = self.session.remove(SESSION_TWITTER_PKCE_VERIFIER).await?;
        Ok(verifier)
    }

    /// Checks the `state` returned by the provider against the stored CSRF state.
    ///
    /// The stored state is consumed whether or not it matches.
    ///
    /// # Returns
    /// - `Ok(())` - The state matches
    /// - `Err(AppError::AuthErr(CsrfValidationFailed))` - Missing or mismatched state
    pub async fn validate_csrf(
        &self,
        provider: Provider,
        state: Option<&str>,
    ) -> Result<(), AppError> {
        let stored = self.take_csrf_token(provider).await?;

        match (stored, state) {
            (Some(stored), Some(state)) if stored == state => Ok(()),
            _ => Err(AuthError::CsrfValidationFailed(provider).into()),
        }
    }
}
