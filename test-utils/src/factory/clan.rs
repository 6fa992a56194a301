//! Clan and membership factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test clans.
///
/// `build()` also inserts the owner's membership row so the clan is consistent
/// with what the application creates.
pub struct ClanFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    description: Option<String>,
}

impl<'a> ClanFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Clan {}", id),
            description: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub async fn build(self) -> Result<entity::clan::Model, DbErr> {
        let now = Utc::now();
        let clan = entity::clan::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            owner_id: ActiveValue::Set(self.owner_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        MemberFactory::new(self.db, clan.id, self.owner_id)
            .role("owner")
            .build()
            .await?;

        Ok(clan)
    }
}

/// Factory for creating clan membership rows.
pub struct MemberFactory<'a> {
    db: &'a DatabaseConnection,
    clan_id: i32,
    user_id: i32,
    role: String,
}

impl<'a> MemberFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, clan_id: i32, user_id: i32) -> Self {
        Self {
            db,
            clan_id,
            user_id,
            role: "member".to_string(),
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub async fn build(self) -> Result<entity::clan_member::Model, DbErr> {
        entity::clan_member::ActiveModel {
            clan_id: ActiveValue::Set(self.clan_id),
            user_id: ActiveValue::Set(self.user_id),
            role: ActiveValue::Set(self.role),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a clan with default values owned by `owner_id`.
pub async fn create_clan(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::clan::Model, DbErr> {
    ClanFactory::new(db, owner_id).build().await
}

/// Adds `user_id` to the clan as a regular member.
pub async fn add_member(
    db: &DatabaseConnection,
    clan_id: i32,
    user_id: i32,
) -> Result<entity::clan_member::Model, DbErr> {
    MemberFactory::new(db, clan_id, user_id).build().await
}
