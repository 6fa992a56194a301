use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::user::PublicUserDto;

/// Clan as listed on the clans index, with its member count.
#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ClanSummaryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ClanMemberDto {
    pub user: PublicUserDto,
    /// Either `owner` or `member`.
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Clan with its full member list.
#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ClanDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub members: Vec<ClanMemberDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PaginatedClansDto {
    pub clans: Vec<ClanSummaryDto>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub entries: u64,
}

#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClanDto {
    #[validate(length(min = 3, max = 32))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Partial update of a clan. Omitted fields are unchanged.
#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClanDto {
    #[validate(length(min = 3, max = 32))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}
