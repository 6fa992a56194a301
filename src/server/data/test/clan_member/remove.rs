use super::*;

#[tokio::test]
async fn removes_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let user = factory::create_user(db).await?;
    factory::add_member(db, clan.id, user.id).await?;

    let repo = ClanMemberRepository::new(db);
    repo.remove(clan.id, user.id).await?;

    assert!(repo.find_by_user(user.id).await?.is_none());
    assert_eq!(repo.count(clan.id).await?, 1);

    Ok(())
}

/// Expected: removing a user who is not a member is a no-op
#[tokio::test]
async fn ignores_non_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;

    let repo = ClanMemberRepository::new(db);
    repo.remove(clan.id, 999).await?;

    assert_eq!(repo.count(clan.id).await?, 1);

    Ok(())
}
