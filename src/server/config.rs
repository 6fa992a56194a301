use std::{fmt, path::PathBuf};

use crate::server::error::config::ConfigError;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_SECRET: &str = "twitter-auth-secret";
const DEFAULT_DATABASE_URL: &str = "sqlite://clans.db?mode=rwc";
const DEFAULT_STATIC_DIR: &str = "htmlPages";

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const APPLE_AUTH_URL: &str = "https://appleid.apple.com/auth/authorize";
const APPLE_TOKEN_URL: &str = "https://appleid.apple.com/auth/token";
const TWITTER_AUTH_URL: &str = "https://twitter.com/i/oauth2/authorize";
const TWITTER_TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";

/// Deployment environment, read from `NODE_ENV`.
///
/// Only the exact values `development` and `production` change behavior:
/// development exposes error details and alters the schema on boot, production
/// marks the session cookie `Secure`. An unset `NODE_ENV` is reported as
/// `development` but behaves like any other non-development environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Other(String),
    Unset,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        match name {
            "development" => Self::Development,
            "production" => Self::Production,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Other(name) => name,
            Self::Unset => "development",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client credentials and endpoints for one OAuth provider.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,

    pub auth_url: String,
    pub token_url: String,
}

pub struct Config {
    pub port: u16,
    pub session_secret: String,
    pub environment: Environment,
    pub database_url: String,
    pub static_dir: PathBuf,

    pub google: Option<OAuthCredentials>,
    pub apple: Option<OAuthCredentials>,
    pub twitter: Option<OAuthCredentials>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Every variable is optional. `PORT` defaults to 8000, `SESSION_SECRET` to a
    /// built-in string and an unset `NODE_ENV` is shown as `development`. Empty
    /// values count as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration with defaults applied
    /// - `Err(ConfigError::InvalidEnvVar)` - `PORT` is not a valid port number
    /// - `Err(ConfigError::MissingEnvVar)` - An OAuth provider is only partially configured
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidEnvVar {
                    name: "PORT".to_string(),
                    value: value.clone(),
                    reason: err.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        let session_secret = var("SESSION_SECRET").unwrap_or_else(|| {
            tracing::warn!("SESSION_SECRET is not set, falling back to the built-in secret");
            DEFAULT_SESSION_SECRET.to_string()
        });

        let environment = var("NODE_ENV")
            .map(|name| Environment::from_name(&name))
            .unwrap_or(Environment::Unset);

        Ok(Self {
            port,
            session_secret,
            environment,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            google: provider_credentials(&var, "GOOGLE", GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL)?,
            apple: provider_credentials(&var, "APPLE", APPLE_AUTH_URL, APPLE_TOKEN_URL)?,
            twitter: provider_credentials(&var, "TWITTER", TWITTER_AUTH_URL, TWITTER_TOKEN_URL)?,
        })
    }
}

/// Reads `<PREFIX>_CLIENT_ID`, `<PREFIX>_CLIENT_SECRET` and `<PREFIX>_CALLBACK_URL`.
///
/// A provider is enabled when all three are set and disabled when none are.
/// Anything in between is reported as the first missing variable.
fn provider_credentials<F>(
    var: &F,
    prefix: &str,
    auth_url: &str,
    token_url: &str,
) -> Result<Option<OAuthCredentials>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let names = [
        format!("{}_CLIENT_ID", prefix),
        format!("{}_CLIENT_SECRET", prefix),
        format!("{}_CALLBACK_URL", prefix),
    ];
    let values: Vec<Option<String>> = names.iter().map(|name| var(name.as_str())).collect();

    if values.iter().all(Option::is_none) {
        return Ok(None);
    }

    if let Some(missing) = names
        .iter()
        .zip(&values)
        .find_map(|(name, value)| value.is_none().then(|| name.clone()))
    {
        return Err(ConfigError::MissingEnvVar(missing));
    }

    let mut values = values.into_iter().flatten();
    match (values.next(), values.next(), values.next()) {
        (Some(client_id), Some(client_secret), Some(callback_url)) => Ok(Some(OAuthCredentials {
            client_id,
            client_secret,
            callback_url,
            auth_url: auth_url.to_string(),
            token_url: token_url.to_string(),
        })),
        _ => Err(ConfigError::MissingEnvVar(names[0].clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn applies_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.session_secret, "twitter-auth-secret");
        assert_eq!(config.environment, Environment::Unset);
        assert_eq!(config.static_dir, PathBuf::from("htmlPages"));
        assert!(config.google.is_none());
        assert!(config.apple.is_none());
        assert!(config.twitter.is_none());
    }

    #[test]
    fn reads_port_and_environment() {
        let config = load(&[("PORT", "9000"), ("NODE_ENV", "production")]).unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.environment.is_production());
        assert!(!config.environment.is_development());
    }

    /// Expected: an unset NODE_ENV is named development but does not act like it
    #[test]
    fn unset_environment_is_not_development() {
        let config = load(&[]).unwrap();

        assert_eq!(config.environment.to_string(), "development");
        assert!(!config.environment.is_development());
        assert!(!config.environment.is_production());

        let explicit = load(&[("NODE_ENV", "development")]).unwrap();
        assert!(explicit.environment.is_development());
    }

    #[test]
    fn keeps_unknown_environment_names() {
        let config = load(&[("NODE_ENV", "staging")]).unwrap();

        assert_eq!(config.environment, Environment::Other("staging".to_string()));
        assert_eq!(config.environment.to_string(), "staging");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = load(&[("PORT", ""), ("SESSION_SECRET", "  ")]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.session_secret, "twitter-auth-secret");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = load(&[("PORT", "eight-thousand")]);

        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn enables_fully_configured_provider() {
        let config = load(&[
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("GOOGLE_CALLBACK_URL", "http://localhost:8000/api/auth/google/callback"),
        ])
        .unwrap();

        let google = config.google.unwrap();
        assert_eq!(google.client_id, "id");
        assert_eq!(google.client_secret, "secret");
        assert_eq!(google.auth_url, GOOGLE_AUTH_URL);
        assert!(config.twitter.is_none());
    }

    #[test]
    fn rejects_partially_configured_provider() {
        let result = load(&[("TWITTER_CLIENT_ID", "id"), ("TWITTER_CLIENT_SECRET", "secret")]);

        match result {
            Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, "TWITTER_CALLBACK_URL"),
            other => panic!("expected MissingEnvVar, got {:?}", other.err()),
        }
    }
}
