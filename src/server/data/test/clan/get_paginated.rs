use super::*;

/// Expected: clans are ordered by name with their member counts
#[tokio::test]
async fn returns_page_with_member_counts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first_owner = factory::create_user(db).await?;
    let second_owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;

    let beta = factory::clan::ClanFactory::new(db, first_owner.id)
        .name("Beta")
        .build()
        .await?;
    factory::clan::ClanFactory::new(db, second_owner.id)
        .name("Alpha")
        .build()
        .await?;
    factory::add_member(db, beta.id, member.id).await?;

    let repo = ClanRepository::new(db);
    let page = repo.get_paginated(0, 10).await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.clans.len(), 2);
    assert_eq!(page.clans[0].clan.name, "Alpha");
    assert_eq!(page.clans[0].member_count, 1);
    assert_eq!(page.clans[1].clan.name, "Beta");
    assert_eq!(page.clans[1].member_count, 2);

    Ok(())
}

/// Expected: later pages hold the remaining clans
#[tokio::test]
async fn splits_clans_across_pages() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::helpers::create_clan_with_owner(db).await?;
    }

    let repo = ClanRepository::new(db);
    let page = repo.get_paginated(1, 2).await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.entries, 2);
    assert_eq!(page.clans.len(), 1);

    Ok(())
}

#[tokio::test]
async fn returns_empty_page_without_clans() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let page = ClanRepository::new(db).get_paginated(0, 10).await?;

    assert_eq!(page.total, 0);
    assert!(page.clans.is_empty());

    Ok(())
}
