use super::*;

#[tokio::test]
async fn updates_name_and_keeps_description() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let created = factory::clan::ClanFactory::new(db, owner.id)
        .description("Original")
        .build()
        .await?;

    let repo = ClanRepository::new(db);
    let clan = repo
        .update(
            created.id,
            UpdateClanParam {
                name: Some("Renamed".to_string()),
                description: None,
            },
        )
        .await?;

    assert_eq!(clan.name, "Renamed");
    assert_eq!(clan.description.as_deref(), Some("Original"));

    Ok(())
}

/// Expected: `Some(None)` clears the description
#[tokio::test]
async fn clears_description() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let created = factory::clan::ClanFactory::new(db, owner.id)
        .description("Original")
        .build()
        .await?;

    let repo = ClanRepository::new(db);
    let clan = repo
        .update(
            created.id,
            UpdateClanParam {
                name: None,
                description: Some(None),
            },
        )
        .await?;

    assert!(clan.description.is_none());

    Ok(())
}
