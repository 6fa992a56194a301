//! User domain models and parameters.
//!
//! Users are created on first OAuth sign-in and carry one optional identifier per
//! linked provider. Parameter types cover profile updates made through the API.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{PublicUserDto, UpdateUserDto, UserDto},
    server::model::oauth::Provider,
};

/// Application user with linked provider identities.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub google_id: Option<String>,
    pub apple_id: Option<String>,
    pub twitter_id: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            avatar_url: entity.avatar_url,
            google_id: entity.google_id,
            apple_id: entity.apple_id,
            twitter_id: entity.twitter_id,
            twitter_username: entity.twitter_username,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Providers this user can sign in with, in a fixed order.
    pub fn providers(&self) -> Vec<Provider> {
        [
            (Provider::Google, &self.google_id),
            (Provider::Apple, &self.apple_id),
            (Provider::Twitter, &self.twitter_id),
        ]
        .into_iter()
        .filter(|(_, id)| id.is_some())
        .map(|(provider, _)| provider)
        .collect()
    }

    /// Converts the user into the DTO returned to the user themselves.
    pub fn into_dto(self) -> UserDto {
        let providers = self
            .providers()
            .into_iter()
            .map(|provider| provider.as_str().to_string())
            .collect();

        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
            twitter_username: self.twitter_username,
            providers,
            created_at: self.created_at,
        }
    }

    /// Converts the user into the DTO visible to other users.
    pub fn into_public_dto(self) -> PublicUserDto {
        PublicUserDto {
            id: self.id,
            name: self.name,
            avatar_url: self.avatar_url,
        }
    }
}

/// Parameters for updating a user's own profile.
///
/// `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParam {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateUserParam {
    /// Converts the request DTO, trimming the name.
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            name: dto.name.map(|name| name.trim().to_string()),
            avatar_url: dto.avatar_url,
        }
    }
}
