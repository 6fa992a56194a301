use super::*;

#[tokio::test]
async fn finds_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let user = repo.find_by_id(created.id).await?.unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(user.name, created.name);

    Ok(())
}

#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn finds_user_by_provider_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .apple_id("apple-7")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_provider_id(Provider::Apple, "apple-7").await?;
    assert_eq!(found.map(|user| user.id), Some(created.id));
    assert!(repo
        .find_by_provider_id(Provider::Google, "apple-7")
        .await?
        .is_none());

    Ok(())
}
