use super::*;
use crate::server::model::user::UpdateUserParam;

/// Expected: only the provided fields change
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .name("Before")
        .avatar_url("https://example.com/before.png")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .update_profile(
            created.id,
            UpdateUserParam {
                name: Some("After".to_string()),
                avatar_url: None,
            },
        )
        .await?;

    assert_eq!(user.name, "After");
    assert_eq!(
        user.avatar_url.as_deref(),
        Some("https://example.com/before.png")
    );
    assert!(user.updated_at >= created.updated_at);

    Ok(())
}

#[tokio::test]
async fn fails_for_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo.update_profile(42, UpdateUserParam::default()).await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
