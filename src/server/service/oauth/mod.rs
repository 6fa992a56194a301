//! OAuth2 sign-in with Google, Apple and Twitter.
//!
//! Each provider service builds the authorization URL for the login redirect and
//! turns the authorization code from the callback into an [`OAuthProfile`]. CSRF
//! state and the PKCE verifier are kept in the session by the controllers.
//!
//! [`OAuthProfile`]: crate::server::model::oauth::OAuthProfile

pub mod apple;
pub mod google;
pub mod twitter;

use oauth2::{AccessToken, AuthorizationCode};
use serde::de::DeserializeOwned;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::oauth::Provider,
};

/// Parameters shared by every provider callback.
///
/// Providers send `error` instead of `code` when the user declines consent.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Returns the authorization code, or the reason the provider gave for not sending one.
    pub fn authorization_code(&self, provider: Provider) -> Result<AuthorizationCode, AuthError> {
        if let Some(error) = &self.error {
            return Err(AuthError::ProviderDenied(provider, error.clone()));
        }

        self.code
            .as_ref()
            .filter(|code| !code.is_empty())
            .map(|code| AuthorizationCode::new(code.clone()))
            .ok_or(AuthError::MissingAuthorizationCode(provider))
    }
}

/// Fetches a JSON resource from a provider API with a bearer token.
async fn fetch_json<T: DeserializeOwned>(
    http_client: &reqwest::Client,
    url: &str,
    access_token: &AccessToken,
) -> Result<T, AppError> {
    let body = http_client
        .get(url)
        .header(
            "Authorization",
            format!("Bearer {}", access_token.secret()),
        )
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?;

    Ok(body)
}
