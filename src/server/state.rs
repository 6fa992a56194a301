//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! Axum's state extraction. It holds:
//! - The database connection pool
//! - The HTTP client used to call provider APIs
//! - One OAuth2 client per configured sign-in provider
//! - The loaded configuration

use std::sync::Arc;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, ExtraTokenFields,
    RevocationErrorResponseType, StandardErrorResponse, StandardRevocableToken,
    StandardTokenIntrospectionResponse, StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::server::config::Config;

/// OAuth2 client with the authorization and token endpoints set.
///
/// `TF` carries provider-specific fields of the token response.
pub(crate) type OAuth2Client<TF = EmptyExtraTokenFields> = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<TF, BasicTokenType>,
    StandardTokenIntrospectionResponse<TF, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Extra token response fields returned by Sign in with Apple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdTokenFields {
    pub id_token: Option<String>,
}

impl ExtraTokenFields for IdTokenFields {}

pub(crate) type AppleOAuth2Client = OAuth2Client<IdTokenFields>;

/// OAuth2 clients for each provider. `None` when the provider is not configured.
#[derive(Clone, Default)]
pub struct OAuthClients {
    pub google: Option<OAuth2Client>,
    pub apple: Option<AppleOAuth2Client>,
    pub twitter: Option<OAuth2Client>,
}

/// Application state containing shared resources and dependencies.
///
/// Every field is cheap to clone: the connection pool and `reqwest::Client` share
/// their internals, and the configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// HTTP client for provider API requests. Redirects are disabled.
    pub http_client: reqwest::Client,

    pub oauth: OAuthClients,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth: OAuthClients,
        config: Config,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth,
            config: Arc::new(config),
        }
    }
}
