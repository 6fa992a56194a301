//! Sign in with Google.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serde::Deserialize;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::oauth::{OAuthProfile, Provider},
    service::oauth::fetch_json,
    state::OAuth2Client,
};

const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    email_verified: Option<bool>,
    picture: Option<String>,
}

pub struct GoogleAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> GoogleAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Builds the Google consent URL requesting the user's OpenID profile and email.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }

    /// Exchanges the authorization code and fetches the user's profile.
    ///
    /// Unverified email addresses are dropped so they cannot be used to link
    /// accounts.
    pub async fn callback(&self, code: AuthorizationCode) -> Result<OAuthProfile, AppError> {
        let token = self
            .oauth_client
            .exchange_code(code)
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let info: GoogleUserInfo =
            fetch_json(self.http_client, GOOGLE_USERINFO_URL, token.access_token()).await?;

        Ok(OAuthProfile {
            provider: Provider::Google,
            provider_user_id: info.sub,
            name: info.name,
            email: info.email.filter(|_| info.email_verified.unwrap_or(false)),
            avatar_url: info.picture,
            username: None,
        })
    }
}
