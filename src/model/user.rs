use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The signed-in user's own profile, including linked providers.
#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub twitter_username: Option<String>,
    pub providers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile of another user as visible to anyone.
#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct PublicUserDto {
    pub id: i32,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Partial update of the signed-in user's profile. Omitted fields are unchanged.
#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}
