//! Clan domain models and parameters.
//!
//! A clan is owned by exactly one user who is also its first member. Membership is
//! exclusive: a user belongs to at most one clan at a time.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    model::clan::{
        ClanDto, ClanMemberDto, ClanSummaryDto, CreateClanDto, PaginatedClansDto, UpdateClanDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::user::User,
    },
};

/// Role of a member within their clan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClanRole {
    Owner,
    Member,
}

impl ClanRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for ClanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClanRole {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            other => Err(InternalError::InvalidStoredValue {
                column: "clan_member.role",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clan {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Clan {
    /// Converts an entity model to a clan domain model at the repository boundary.
    pub fn from_entity(entity: entity::clan::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }
}

/// A user's membership row.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub clan_id: i32,
    pub user_id: i32,
    pub role: ClanRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Converts an entity model, failing if the stored role is unknown.
    pub fn from_entity(entity: entity::clan_member::Model) -> Result<Self, AppError> {
        Ok(Self {
            clan_id: entity.clan_id,
            user_id: entity.user_id,
            role: entity.role.parse()?,
            joined_at: entity.joined_at,
        })
    }
}

/// A member together with their user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanMember {
    pub user: User,
    pub role: ClanRole,
    pub joined_at: DateTime<Utc>,
}

impl ClanMember {
    pub fn into_dto(self) -> ClanMemberDto {
        ClanMemberDto {
            user: self.user.into_public_dto(),
            role: self.role.to_string(),
            joined_at: self.joined_at,
        }
    }
}

/// Clan with its members, owner first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanWithMembers {
    pub clan: Clan,
    pub members: Vec<ClanMember>,
}

impl ClanWithMembers {
    pub fn into_dto(self) -> ClanDto {
        ClanDto {
            id: self.clan.id,
            name: self.clan.name,
            description: self.clan.description,
            owner_id: self.clan.owner_id,
            members: self.members.into_iter().map(ClanMember::into_dto).collect(),
            created_at: self.clan.created_at,
            updated_at: self.clan.updated_at,
        }
    }
}

/// Clan with its member count, as shown on the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanSummary {
    pub clan: Clan,
    pub member_count: u64,
}

impl ClanSummary {
    pub fn into_dto(self) -> ClanSummaryDto {
        ClanSummaryDto {
            id: self.clan.id,
            name: self.clan.name,
            description: self.clan.description,
            owner_id: self.clan.owner_id,
            member_count: self.member_count,
            created_at: self.clan.created_at,
        }
    }
}

/// One page of clan summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedClans {
    pub clans: Vec<ClanSummary>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub entries: u64,
}

impl PaginatedClans {
    pub fn into_dto(self) -> PaginatedClansDto {
        PaginatedClansDto {
            clans: self.clans.into_iter().map(ClanSummary::into_dto).collect(),
            total: self.total,
            total_pages: self.total_pages,
            page: self.page,
            entries: self.entries,
        }
    }
}

/// Parameters for creating a clan owned by `owner_id`.
#[derive(Debug, Clone)]
pub struct CreateClanParam {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

impl CreateClanParam {
    pub fn from_dto(owner_id: i32, dto: CreateClanDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: normalize_description(dto.description),
            owner_id,
        }
    }
}

/// Parameters for updating a clan. `None` leaves a field unchanged; an empty
/// description clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateClanParam {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateClanParam {
    pub fn from_dto(dto: UpdateClanDto) -> Self {
        Self {
            name: dto.name.map(|name| name.trim().to_string()),
            description: dto.description.map(|d| normalize_description(Some(d))),
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
