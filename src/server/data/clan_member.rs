//! Clan membership repository.
//!
//! Generic over the connection so the clan repository can run membership writes
//! inside its transactions.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        clan::{ClanMember, ClanRole, Membership},
        user::User,
    },
};

pub struct ClanMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClanMemberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the membership of a user, if they belong to any clan.
    ///
    /// # Returns
    /// - `Ok(Some(Membership))` - The user's membership
    /// - `Ok(None)` - The user is not in a clan
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr)` - Stored role is not a known role
    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<Membership>, AppError> {
        let entity = entity::prelude::ClanMember::find()
            .filter(entity::clan_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        entity.map(Membership::from_entity).transpose()
    }

    /// Adds a user to a clan with the given role.
    pub async fn add(
        &self,
        clan_id: i32,
        user_id: i32,
        role: ClanRole,
    ) -> Result<Membership, AppError> {
        let entity = entity::clan_member::ActiveModel {
            clan_id: ActiveValue::Set(clan_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Membership::from_entity(entity)
    }

    /// Removes a user from a clan. Removing a non-member is a no-op.
    pub async fn remove(&self, clan_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::ClanMember::delete_by_id((clan_id, user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Removes every member of a clan.
    pub async fn remove_all(&self, clan_id: i32) -> Result<(), DbErr> {
        entity::prelude::ClanMember::delete_many()
            .filter(entity::clan_member::Column::ClanId.eq(clan_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Gets the members of a clan with their profiles, owner first, then by join date.
    pub async fn get_members(&self, clan_id: i32) -> Result<Vec<ClanMember>, AppError> {
        let rows = entity::prelude::ClanMember::find()
            .filter(entity::clan_member::Column::ClanId.eq(clan_id))
            .order_by_asc(entity::clan_member::Column::JoinedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        let mut members = Vec::with_capacity(rows.len());
        for (membership, user) in rows {
            let Some(user) = user else {
                continue;
            };

            members.push(ClanMember {
                user: User::from_entity(user),
                role: membership.role.parse()?,
                joined_at: membership.joined_at,
            });
        }

        members.sort_by_key(|member| member.role != ClanRole::Owner);

        Ok(members)
    }

    /// Counts the members of a clan, including the owner.
    pub async fn count(&self, clan_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ClanMember::find()
            .filter(entity::clan_member::Column::ClanId.eq(clan_id))
            .count(self.db)
            .await
    }
}
