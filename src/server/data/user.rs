//! User data repository for database operations.
//!
//! Provides the `UserRepository` for creating users from OAuth profiles, looking
//! them up and applying profile updates, converting entity models to domain models
//! at the boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::{
    oauth::{OAuthProfile, Provider},
    user::{UpdateUserParam, User},
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or updates the user behind an OAuth profile.
    ///
    /// Resolution order:
    /// 1. A user already linked to the provider account is refreshed
    /// 2. Otherwise a user with the same email gets the provider account linked
    /// 3. Otherwise a new user is inserted
    ///
    /// Refreshing never overwrites the name, which the user may have changed. The
    /// avatar, Twitter handle and a missing email are taken from the profile.
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(DbErr)` - Database error during lookup or write
    pub async fn upsert_from_profile(&self, profile: &OAuthProfile) -> Result<User, DbErr> {
        let existing = match self
            .find_entity_by_provider_id(profile.provider, &profile.provider_user_id)
            .await?
        {
            Some(entity) => Some(entity),
            None => match profile.email.as_deref() {
                Some(email) => {
                    entity::prelude::User::find()
                        .filter(entity::user::Column::Email.eq(email))
                        .one(self.db)
                        .await?
                }
                None => None,
            },
        };

        let entity = match existing {
            Some(entity) => {
                let email_missing = entity.email.is_none();
                let mut active_model: entity::user::ActiveModel = entity.into();

                set_provider_id(&mut active_model, profile);
                if let Some(avatar_url) = &profile.avatar_url {
                    active_model.avatar_url = ActiveValue::Set(Some(avatar_url.clone()));
                }
                if email_missing && profile.email.is_some() {
                    active_model.email = ActiveValue::Set(profile.email.clone());
                }
                active_model.updated_at = ActiveValue::Set(Utc::now());

                active_model.update(self.db).await?
            }
            None => {
                let now = Utc::now();
                let mut active_model = entity::user::ActiveModel {
                    name: ActiveValue::Set(profile.display_name()),
                    email: ActiveValue::Set(profile.email.clone()),
                    avatar_url: ActiveValue::Set(profile.avatar_url.clone()),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };
                set_provider_id(&mut active_model, profile);

                active_model.insert(self.db).await?
            }
        };

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds the user linked to a provider account.
    pub async fn find_by_provider_id(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<User>, DbErr> {
        let entity = self
            .find_entity_by_provider_id(provider, provider_user_id)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Applies a profile update. Fields set to `None` are left unchanged.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(DbErr::RecordNotFound)` - No user with that ID
    pub async fn update_profile(&self, id: i32, param: UpdateUserParam) -> Result<User, DbErr> {
        let entity = entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("User with id {} not found", id)))?;

        let mut active_model: entity::user::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(avatar_url) = param.avatar_url {
            active_model.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    /// Deletes a user together with their membership row.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ClanMember::delete_many()
            .filter(entity::clan_member::Column::UserId.eq(id))
            .exec(self.db)
            .await?;

        entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    async fn find_entity_by_provider_id(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let column = match provider {
            Provider::Google => entity::user::Column::GoogleId,
            Provider::Apple => entity::user::Column::AppleId,
            Provider::Twitter => entity::user::Column::TwitterId,
        };

        entity::prelude::User::find()
            .filter(column.eq(provider_user_id))
            .one(self.db)
            .await
    }
}

fn set_provider_id(active_model: &mut entity::user::ActiveModel, profile: &OAuthProfile) {
    let provider_user_id = ActiveValue::Set(Some(profile.provider_user_id.clone()));

    match profile.provider {
        Provider::Google => active_model.google_id = provider_user_id,
        Provider::Apple => active_model.apple_id = provider_user_id,
        Provider::Twitter => {
            active_model.twitter_id = provider_user_id;
            if let Some(username) = &profile.username {
                active_model.twitter_username = ActiveValue::Set(Some(username.clone()));
            }
        }
    }
}
