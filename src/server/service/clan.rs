//! Clan service for business logic.
//!
//! Enforces the membership rules:
//! - A user belongs to at most one clan
//! - The creator of a clan becomes its owner and first member
//! - Only the owner may update or delete a clan
//! - The owner cannot leave their clan; they delete it instead

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::{clan::ClanRepository, clan_member::ClanMemberRepository},
    error::{auth::AuthError, AppError},
    model::clan::{
        Clan, ClanMember, ClanRole, ClanWithMembers, CreateClanParam, PaginatedClans,
        UpdateClanParam,
    },
};

/// Largest page size accepted by the clan index.
pub const MAX_ENTRIES_PER_PAGE: u64 = 100;

const ALREADY_IN_CLAN: &str = "You are already a member of a clan";
const NAME_TAKEN: &str = "A clan with that name already exists";

pub struct ClanService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClanService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a clan owned by `param.owner_id`.
    ///
    /// # Returns
    /// - `Ok(ClanWithMembers)` - The new clan with its owner as sole member
    /// - `Err(AppError::Conflict)` - The owner is already in a clan or the name is taken
    pub async fn create(&self, param: CreateClanParam) -> Result<ClanWithMembers, AppError> {
        let members = ClanMemberRepository::new(self.db);
        let clans = ClanRepository::new(self.db);

        if members.find_by_user(param.owner_id).await?.is_some() {
            return Err(AppError::Conflict(ALREADY_IN_CLAN.to_string()));
        }
        if clans.name_taken(&param.name, None).await? {
            return Err(AppError::Conflict(NAME_TAKEN.to_string()));
        }

        let clan = clans
            .create_with_owner(param)
            .await
            .map_err(|err| conflict_on_unique_violation(err, NAME_TAKEN))?;

        tracing::info!("User {} created clan {} ({})", clan.owner_id, clan.id, clan.name);

        self.with_members(clan).await
    }

    /// Gets one page of clans.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `entries` - Clans per page, between 1 and [`MAX_ENTRIES_PER_PAGE`]
    ///
    /// # Returns
    /// - `Ok(PaginatedClans)` - The requested page
    /// - `Err(AppError::BadRequest)` - `entries` is out of range
    pub async fn list(&self, page: u64, entries: u64) -> Result<PaginatedClans, AppError> {
        if entries == 0 || entries > MAX_ENTRIES_PER_PAGE {
            return Err(AppError::BadRequest(format!(
                "entries must be between 1 and {}",
                MAX_ENTRIES_PER_PAGE
            )));
        }

        let clans = ClanRepository::new(self.db)
            .get_paginated(page, entries)
            .await?;

        Ok(clans)
    }

    /// Gets a clan with its members.
    pub async fn get(&self, id: i32) -> Result<ClanWithMembers, AppError> {
        let clan = self.find(id).await?;

        self.with_members(clan).await
    }

    /// Updates a clan's name or description.
    ///
    /// # Returns
    /// - `Ok(ClanWithMembers)` - The updated clan
    /// - `Err(AppError::NotFound)` - No clan with that ID
    /// - `Err(AppError::AuthErr(AccessDenied))` - The user is not the owner
    /// - `Err(AppError::Conflict)` - The new name is taken
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        param: UpdateClanParam,
    ) -> Result<ClanWithMembers, AppError> {
        let clans = ClanRepository::new(self.db);
        let clan = self.find(id).await?;

        require_owner(&clan, user_id, "update")?;

        if let Some(name) = &param.name {
            if clans.name_taken(name, Some(id)).await? {
                return Err(AppError::Conflict(NAME_TAKEN.to_string()));
            }
        }

        let clan = clans
            .update(id, param)
            .await
            .map_err(|err| conflict_on_unique_violation(err.into(), NAME_TAKEN))?;

        self.with_members(clan).await
    }

    /// Deletes a clan and all of its memberships.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        let clan = self.find(id).await?;

        require_owner(&clan, user_id, "delete")?;

        ClanRepository::new(self.db).delete(id).await?;

        tracing::info!("User {} deleted clan {} ({})", user_id, clan.id, clan.name);

        Ok(())
    }

    /// Adds the user to a clan as a member.
    ///
    /// # Returns
    /// - `Ok(ClanWithMembers)` - The clan including the new member
    /// - `Err(AppError::NotFound)` - No clan with that ID
    /// - `Err(AppError::Conflict)` - The user is already in a clan
    pub async fn join(&self, user_id: i32, id: i32) -> Result<ClanWithMembers, AppError> {
        let clan = self.find(id).await?;
        let members = ClanMemberRepository::new(self.db);

        if let Some(membership) = members.find_by_user(user_id).await? {
            let message = if membership.clan_id == id {
                "You are already a member of this clan"
            } else {
                ALREADY_IN_CLAN
            };
            return Err(AppError::Conflict(message.to_string()));
        }

        members
            .add(id, user_id, ClanRole::Member)
            .await
            .map_err(|err| conflict_on_unique_violation(err, ALREADY_IN_CLAN))?;

        tracing::info!("User {} joined clan {}", user_id, id);

        self.with_members(clan).await
    }

    /// Removes the user from a clan.
    ///
    /// # Returns
    /// - `Ok(())` - The user left the clan
    /// - `Err(AppError::NotFound)` - No clan with that ID
    /// - `Err(AppError::BadRequest)` - The user is not a member or is the owner
    pub async fn leave(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        let clan = self.find(id).await?;
        let members = ClanMemberRepository::new(self.db);

        let membership = members
            .find_by_user(user_id)
            .await?
            .filter(|membership| membership.clan_id == id)
            .ok_or_else(|| AppError::BadRequest("You are not a member of this clan".to_string()))?;

        if membership.role == ClanRole::Owner || clan.is_owned_by(user_id) {
            return Err(AppError::BadRequest(
                "The owner cannot leave the clan; delete it instead".to_string(),
            ));
        }

        members.remove(id, user_id).await?;

        tracing::info!("User {} left clan {}", user_id, id);

        Ok(())
    }

    /// Lists the members of a clan, owner first.
    pub async fn members(&self, id: i32) -> Result<Vec<ClanMember>, AppError> {
        self.find(id).await?;

        ClanMemberRepository::new(self.db).get_members(id).await
    }

    async fn find(&self, id: i32) -> Result<Clan, AppError> {
        ClanRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Clan with id {} not found", id)))
    }

    async fn with_members(&self, clan: Clan) -> Result<ClanWithMembers, AppError> {
        let members = ClanMemberRepository::new(self.db)
            .get_members(clan.id)
            .await?;

        Ok(ClanWithMembers { clan, members })
    }
}

fn require_owner(clan: &Clan, user_id: i32, action: &str) -> Result<(), AppError> {
    if clan.is_owned_by(user_id) {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        user_id,
        format!("attempted to {} clan {} owned by user {}", action, clan.id, clan.owner_id),
    )
    .into())
}

/// Maps a unique constraint violation that slipped past the pre-checks to a conflict.
fn conflict_on_unique_violation(err: AppError, message: &str) -> AppError {
    match err {
        AppError::DbErr(db_err) if is_unique_violation(&db_err) => {
            AppError::Conflict(message.to_string())
        }
        other => other,
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
