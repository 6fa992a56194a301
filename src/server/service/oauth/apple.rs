//! Sign in with Apple.
//!
//! Apple posts the callback as a form (`response_mode=form_post`) and returns the
//! user's identity only inside the `id_token` of the token response. The user's
//! name is sent once, as JSON in the `user` form field of the first sign-in.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use oauth2::{AuthorizationCode, CsrfToken, Scope};
use serde::Deserialize;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::oauth::{OAuthProfile, Provider},
    state::AppleOAuth2Client,
};

const APPLE_ISSUER: &str = "https://appleid.apple.com";

/// Claims read from Apple's identity token.
#[derive(Debug, Deserialize, PartialEq)]
pub struct AppleIdClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    pub email: Option<String>,
}

/// `user` form field sent with the first sign-in. Its `email` is ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AppleUser {
    name: Option<AppleUserName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppleUserName {
    first_name: Option<String>,
    last_name: Option<String>,
}

pub struct AppleAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a AppleOAuth2Client,
}

impl<'a> AppleAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a AppleOAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Builds the Apple authorize URL requesting name and email via form post.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("name".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_extra_param("response_mode", "form_post")
            .url()
    }

    /// Exchanges the authorization code and reads the identity from the id_token.
    ///
    /// # Arguments
    /// - `code` - Authorization code from the callback form
    /// - `user` - Raw `user` form field, only present on the first sign-in
    ///
    /// # Returns
    /// - `Ok(OAuthProfile)` - Identity of the signed-in user
    /// - `Err(AppError::AuthErr(TokenExchange))` - Apple rejected the code
    /// - `Err(AppError::AuthErr(InvalidIdToken))` - Missing or foreign id_token
    pub async fn callback(
        &self,
        code: AuthorizationCode,
        user: Option<&str>,
    ) -> Result<OAuthProfile, AppError> {
        let token = self
            .oauth_client
            .exchange_code(code)
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let id_token = token
            .extra_fields()
            .id_token
            .as_deref()
            .ok_or_else(|| AuthError::InvalidIdToken("token response has no id_token".to_string()))?;

        let claims = decode_id_token_claims(id_token, self.oauth_client.client_id().as_str())?;

        Ok(profile_from_claims(claims, user))
    }
}

/// Builds the profile of an Apple sign-in.
///
/// Identity and email come only from the id_token claims. The `user` form field
/// is posted by the browser and only contributes the display name.
fn profile_from_claims(claims: AppleIdClaims, user: Option<&str>) -> OAuthProfile {
    let user = match user {
        Some(raw) => serde_json::from_str::<AppleUser>(raw).unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable Apple user payload: {}", err);
            AppleUser::default()
        }),
        None => AppleUser::default(),
    };

    let name = user.name.and_then(|name| {
        let full = [name.first_name, name.last_name]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        (!full.trim().is_empty()).then_some(full)
    });

    OAuthProfile {
        provider: Provider::Apple,
        provider_user_id: claims.sub,
        name,
        email: claims.email,
        avatar_url: None,
        username: None,
    }
}

/// Reads and checks the claims of an Apple identity token.
///
/// The token comes straight from Apple's token endpoint over TLS, so only the
/// issuer, audience and expiry are checked here.
pub fn decode_id_token_claims(id_token: &str, client_id: &str) -> Result<AppleIdClaims, AuthError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidIdToken("id_token is not a JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| AuthError::InvalidIdToken(format!("payload is not base64url: {}", err)))?;

    let claims: AppleIdClaims = serde_json::from_slice(&bytes)
        .map_err(|err| AuthError::InvalidIdToken(format!("unreadable claims: {}", err)))?;

    if claims.iss != APPLE_ISSUER {
        return Err(AuthError::InvalidIdToken(format!(
            "unexpected issuer {}",
            claims.iss
        )));
    }
    if claims.aud != client_id {
        return Err(AuthError::InvalidIdToken(format!(
            "token issued for {} instead of {}",
            claims.aud, client_id
        )));
    }
    if claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::InvalidIdToken("id_token has expired".to_string()));
    }

    Ok(claims)
}
