//! OAuth provider identities.

use std::fmt;

/// Supported OAuth sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Apple,
    Twitter,
}

impl Provider {
    /// Lowercase identifier used in session keys and the user's provider list.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
            Self::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Google => "Google",
            Self::Apple => "Apple",
            Self::Twitter => "Twitter",
        };
        f.write_str(name)
    }
}

/// Identity returned by a provider after a successful authorization code exchange.
///
/// Providers disclose different fields: Twitter never returns an email, Apple only
/// returns the user's name on the very first sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthProfile {
    pub provider: Provider,
    /// Stable user identifier at the provider (`sub` for Google and Apple).
    pub provider_user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Twitter handle without the leading `@`.
    pub username: Option<String>,
}

impl OAuthProfile {
    /// Name shown for a newly created account.
    ///
    /// Falls back from the provider's display name to the handle, then to the
    /// local part of the email address, then to a placeholder.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or(self.username.as_deref())
            .map(str::to_string)
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Player".to_string())
    }
}
