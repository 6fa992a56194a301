use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Raised when an OAuth provider is only partially configured, e.g. a client ID
    /// is present but its secret is not. Check `.env.example` for the full set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the environment variable
        name: String,
        /// The raw value that failed to parse
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Environment variable holds a URL that does not parse.
    #[error("Invalid URL in environment variable {name}: {source}")]
    InvalidUrl {
        /// Name of the environment variable
        name: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}
