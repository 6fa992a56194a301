//! User service for business logic.
//!
//! Provides the `UserService` for signing users in from OAuth profiles, reading and
//! updating profiles and deleting accounts.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{clan::ClanRepository, user::UserRepository},
    error::AppError,
    model::{
        oauth::OAuthProfile,
        user::{UpdateUserParam, User},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Resolves the user behind a provider profile, creating or linking as needed.
    pub async fn sign_in(&self, profile: &OAuthProfile) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .upsert_from_profile(profile)
            .await?;

        tracing::info!(
            "User {} signed in with {}",
            user.id,
            profile.provider
        );

        Ok(user)
    }

    /// Updates the user's own name and avatar.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::BadRequest)` - The name is blank after trimming
    pub async fn update_profile(&self, id: i32, param: UpdateUserParam) -> Result<User, AppError> {
        if param.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }

        let user = UserRepository::new(self.db)
            .update_profile(id, param)
            .await?;

        Ok(user)
    }

    /// Deletes the user's account.
    ///
    /// Owners must delete their clan first so a clan never loses its owner.
    ///
    /// # Returns
    /// - `Ok(())` - Account and membership deleted
    /// - `Err(AppError::Conflict)` - The user still owns a clan
    pub async fn delete_account(&self, id: i32) -> Result<(), AppError> {
        if let Some(clan) = ClanRepository::new(self.db).find_by_owner(id).await? {
            return Err(AppError::Conflict(format!(
                "You own the clan \"{}\"; delete it before deleting your account",
                clan.name
            )));
        }

        UserRepository::new(self.db).delete(id).await?;

        tracing::info!("User {} deleted their account", id);

        Ok(())
    }
}
