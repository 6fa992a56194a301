use super::*;

#[tokio::test]
async fn detects_taken_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;

    let repo = ClanRepository::new(db);

    assert!(repo.name_taken(&clan.name, None).await?);
    assert!(!repo.name_taken("Unused Name", None).await?);

    Ok(())
}

/// Expected: a clan keeping its own name does not count as a conflict
#[tokio::test]
async fn ignores_excluded_clan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;

    let repo = ClanRepository::new(db);

    assert!(!repo.name_taken(&clan.name, Some(clan.id)).await?);

    Ok(())
}
