//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// Defaults to a Google-linked user named `User {n}` with no email.
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: Option<String>,
    avatar_url: Option<String>,
    google_id: Option<String>,
    apple_id: Option<String>,
    twitter_id: Option<String>,
    twitter_username: Option<String>,
}

impl<'a> UserFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("User {}", id),
            email: None,
            avatar_url: None,
            google_id: Some(format!("google_{}", id)),
            apple_id: None,
            twitter_id: None,
            twitter_username: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn google_id(mut self, google_id: impl Into<String>) -> Self {
        self.google_id = Some(google_id.into());
        self
    }

    /// Links an Apple identity. Clears the default Google identity.
    pub fn apple_id(mut self, apple_id: impl Into<String>) -> Self {
        self.google_id = None;
        self.apple_id = Some(apple_id.into());
        self
    }

    /// Links a Twitter identity. Clears the default Google identity.
    pub fn twitter(mut self, twitter_id: impl Into<String>, username: impl Into<String>) -> Self {
        self.google_id = None;
        self.twitter_id = Some(twitter_id.into());
        self.twitter_username = Some(username.into());
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            avatar_url: ActiveValue::Set(self.avatar_url),
            google_id: ActiveValue::Set(self.google_id),
            apple_id: ActiveValue::Set(self.apple_id),
            twitter_id: ActiveValue::Set(self.twitter_id),
            twitter_username: ActiveValue::Set(self.twitter_username),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(user.id > 0);
        assert!(!user.name.is_empty());
        assert!(user.google_id.is_some());
        assert!(user.email.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_twitter_user_without_google_id() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db)
            .name("Tweeter")
            .twitter("tw-1", "tweeter")
            .build()
            .await?;

        assert_eq!(user.name, "Tweeter");
        assert!(user.google_id.is_none());
        assert_eq!(user.twitter_id.as_deref(), Some("tw-1"));
        assert_eq!(user.twitter_username.as_deref(), Some("tweeter"));

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.id, user2.id);
        assert_ne!(user1.google_id, user2.google_id);

        Ok(())
    }
}
