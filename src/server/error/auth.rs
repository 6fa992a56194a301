use axum::http::StatusCode;
use oauth2::{
    basic::BasicErrorResponseType, HttpClientError, RequestTokenError, StandardErrorResponse,
};
use thiserror::Error;

use crate::server::model::oauth::Provider;

/// Error returned by `oauth2` when exchanging an authorization code fails.
pub type TokenExchangeError =
    RequestTokenError<HttpClientError<reqwest::Error>, StandardErrorResponse<BasicErrorResponseType>>;

const LOGIN_FAILED: &str = "There was an issue logging you in, please try again.";

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The `state` parameter in the OAuth callback does not match the token stored
    /// in the session, or no token was stored at all. Results in a 400 Bad Request.
    #[error("Failed to login user due to CSRF state mismatch for {0}")]
    CsrfValidationFailed(Provider),

    /// OAuth callback arrived without an authorization code.
    ///
    /// Results in a 400 Bad Request.
    #[error("{0} callback did not include an authorization code")]
    MissingAuthorizationCode(Provider),

    /// Twitter callback arrived without a PKCE verifier in the session.
    ///
    /// Results in a 400 Bad Request.
    #[error("{0} callback is missing the PKCE verifier from the session")]
    MissingPkceVerifier(Provider),

    /// The provider redirected back with an error, e.g. the user declined consent.
    ///
    /// Results in a 401 Unauthorized.
    #[error("{0} sign-in was not completed: {1}")]
    ProviderDenied(Provider, String),

    /// No credentials are configured for the provider.
    ///
    /// Results in a 503 Service Unavailable.
    #[error("{0} sign-in is not configured on this server")]
    ProviderNotConfigured(Provider),

    /// Exchanging the authorization code for tokens failed.
    ///
    /// Results in a 401 Unauthorized with a generic message; details are logged.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(#[from] TokenExchangeError),

    /// The identity token returned by the provider could not be read or does not
    /// belong to this application.
    ///
    /// Results in a 401 Unauthorized with a generic message.
    #[error("Invalid identity token: {0}")]
    InvalidIdToken(String),

    /// No user ID is stored in the session.
    ///
    /// Results in a 401 Unauthorized.
    #[error("User not found in session")]
    UserNotInSession,

    /// The user is signed in but not allowed to perform the action.
    ///
    /// Results in a 403 Forbidden. The second field describes the attempted action
    /// and is only logged.
    #[error("User {0} was denied access: {1}")]
    AccessDenied(i32, String),
}

impl AuthError {
    /// HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CsrfValidationFailed(_)
            | Self::MissingAuthorizationCode(_)
            | Self::MissingPkceVerifier(_) => StatusCode::BAD_REQUEST,
            Self::ProviderDenied(_, _)
            | Self::TokenExchange(_)
            | Self::InvalidIdToken(_)
            | Self::UserNotInSession => StatusCode::UNAUTHORIZED,
            Self::AccessDenied(_, _) => StatusCode::FORBIDDEN,
            Self::ProviderNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message safe to return to the client.
    ///
    /// OAuth failures share one generic message to avoid leaking provider
    /// responses; the full error is still logged by the error renderer.
    pub fn client_message(&self) -> String {
        match self {
            Self::CsrfValidationFailed(_)
            | Self::MissingAuthorizationCode(_)
            | Self::MissingPkceVerifier(_)
            | Self::TokenExchange(_)
            | Self::InvalidIdToken(_) => LOGIN_FAILED.to_string(),
            Self::ProviderDenied(provider, _) => {
                format!("{} sign-in was cancelled or denied", provider)
            }
            Self::ProviderNotConfigured(_) => self.to_string(),
            Self::UserNotInSession => "Authentication required".to_string(),
            Self::AccessDenied(_, _) => {
                "You do not have permission to perform this action".to_string()
            }
        }
    }
}
