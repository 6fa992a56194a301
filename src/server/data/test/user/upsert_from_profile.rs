use super::*;

/// Expected: a first sign-in inserts a user linked to the provider
#[tokio::test]
async fn creates_new_user_from_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_from_profile(&OAuthProfile {
            email: Some("ada@example.com".to_string()),
            avatar_url: Some("https://example.com/ada.png".to_string()),
            ..profile(Provider::Google, "g-1")
        })
        .await?;

    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.google_id.as_deref(), Some("g-1"));
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    assert_eq!(user.avatar_url.as_deref(), Some("https://example.com/ada.png"));
    assert!(user.apple_id.is_none());

    Ok(())
}

/// Expected: signing in again returns the same user and keeps a renamed name
#[tokio::test]
async fn returns_existing_user_on_repeat_sign_in() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .name("Renamed")
        .google_id("g-1")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_from_profile(&OAuthProfile {
            avatar_url: Some("https://example.com/new.png".to_string()),
            ..profile(Provider::Google, "g-1")
        })
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.name, "Renamed");
    assert_eq!(user.avatar_url.as_deref(), Some("https://example.com/new.png"));

    Ok(())
}

/// Expected: a new provider with a known email is linked to the existing user
#[tokio::test]
async fn links_provider_to_user_with_same_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .google_id("g-1")
        .email("ada@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_from_profile(&OAuthProfile {
            email: Some("ada@example.com".to_string()),
            ..profile(Provider::Apple, "apple-1")
        })
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.google_id.as_deref(), Some("g-1"));
    assert_eq!(user.apple_id.as_deref(), Some("apple-1"));

    Ok(())
}

/// Expected: Twitter sign-in stores the handle and falls back to it for the name
#[tokio::test]
async fn stores_twitter_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_from_profile(&OAuthProfile {
            name: None,
            username: Some("ada".to_string()),
            ..profile(Provider::Twitter, "tw-1")
        })
        .await?;

    assert_eq!(user.name, "ada");
    assert_eq!(user.twitter_id.as_deref(), Some("tw-1"));
    assert_eq!(user.twitter_username.as_deref(), Some("ada"));

    Ok(())
}

/// Expected: different provider accounts without a shared email create separate users
#[tokio::test]
async fn creates_separate_users_without_shared_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo
        .upsert_from_profile(&profile(Provider::Google, "g-1"))
        .await?;
    let second = repo
        .upsert_from_profile(&profile(Provider::Twitter, "tw-1"))
        .await?;

    assert_ne!(first.id, second.id);

    Ok(())
}

/// Expected: a profile without an email creates a separate user instead of
/// linking to an account that has an email
#[tokio::test]
async fn profile_without_email_never_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let victim = factory::user::UserFactory::new(db)
        .email("victim@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_from_profile(&profile(Provider::Apple, "apple-attacker"))
        .await?;

    assert_ne!(user.id, victim.id);
    assert!(user.email.is_none());

    let victim_after = repo.find_by_id(victim.id).await?.unwrap();
    assert!(victim_after.apple_id.is_none());

    Ok(())
}
