//! Sign in with Twitter (OAuth 2.0 with PKCE).

use oauth2::{
    AuthorizationCode, CsrfToken, PkceCodeChallenge, PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::oauth::{OAuthProfile, Provider},
    service::oauth::fetch_json,
    state::OAuth2Client,
};

const TWITTER_ME_URL: &str = "https://api.twitter.com/2/users/me?user.fields=profile_image_url";

#[derive(Debug, Deserialize)]
struct TwitterUserResponse {
    data: TwitterUser,
}

#[derive(Debug, Deserialize)]
struct TwitterUser {
    id: String,
    name: Option<String>,
    username: String,
    profile_image_url: Option<String>,
}

pub struct TwitterAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> TwitterAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Builds the Twitter authorize URL with a fresh PKCE challenge.
    ///
    /// # Returns
    /// - The authorize URL
    /// - The CSRF state to store in the session
    /// - The PKCE verifier to store in the session for the callback
    pub fn login_url(&self) -> (Url, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_token) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("tweet.read".to_string()))
            .add_scope(Scope::new("users.read".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        (url, csrf_token, pkce_verifier)
    }

    /// Exchanges the authorization code using the stored PKCE verifier and fetches
    /// the user's profile. Twitter does not disclose email addresses.
    pub async fn callback(
        &self,
        code: AuthorizationCode,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<OAuthProfile, AppError> {
        let token = self
            .oauth_client
            .exchange_code(code)
            .set_pkce_verifier(pkce_verifier)
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let response: TwitterUserResponse =
            fetch_json(self.http_client, TWITTER_ME_URL, token.access_token()).await?;
        let user = response.data;

        Ok(OAuthProfile {
            provider: Provider::Twitter,
            provider_user_id: user.id,
            name: user.name,
            email: None,
            avatar_url: user.profile_image_url,
            username: Some(user.username),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{config::Config, startup::setup_oauth_clients};

    #[test]
    fn login_url_carries_pkce_challenge() {
        let config = Config::from_lookup(|name| match name {
            "TWITTER_CLIENT_ID" => Some("twitter-client".to_string()),
            "TWITTER_CLIENT_SECRET" => Some("secret".to_string()),
            "TWITTER_CALLBACK_URL" => {
                Some("http://localhost:8000/api/auth/twitter/callback".to_string())
            }
            _ => None,
        })
        .unwrap();
        let oauth_client = setup_oauth_clients(&config).unwrap().twitter.unwrap();
        let http_client = reqwest::Client::new();
        let service = TwitterAuthService::new(&http_client, &oauth_client);

        let (url, _csrf, verifier) = service.login_url();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("twitter.com"));
        assert!(query.contains(&("code_challenge_method".to_string(), "S256".to_string())));
        assert!(query.contains(&("scope".to_string(), "tweet.read users.read".to_string())));
        assert!(query.iter().any(|(key, _)| key == "code_challenge"));
        assert!(!verifier.secret().is_empty());
    }
}
