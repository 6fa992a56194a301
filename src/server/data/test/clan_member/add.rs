use super::*;

#[tokio::test]
async fn adds_member_with_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let user = factory::create_user(db).await?;

    let repo = ClanMemberRepository::new(db);
    let membership = repo.add(clan.id, user.id, ClanRole::Member).await?;

    assert_eq!(membership.clan_id, clan.id);
    assert_eq!(membership.role, ClanRole::Member);
    assert_eq!(repo.count(clan.id).await?, 2);

    Ok(())
}

/// Expected: the unique user column rejects a second membership
#[tokio::test]
async fn rejects_second_clan_for_same_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_first_owner, first) = factory::helpers::create_clan_with_owner(db).await?;
    let (_second_owner, second) = factory::helpers::create_clan_with_owner(db).await?;
    let user = factory::create_user(db).await?;

    let repo = ClanMemberRepository::new(db);
    repo.add(first.id, user.id, ClanRole::Member).await?;

    let result = repo.add(second.id, user.id, ClanRole::Member).await;

    assert!(result.is_err());

    Ok(())
}

/// Expected: an unknown stored role surfaces as an internal error
#[tokio::test]
async fn rejects_unknown_stored_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let user = factory::create_user(db).await?;
    factory::clan::MemberFactory::new(db, clan.id, user.id)
        .role("emperor")
        .build()
        .await?;

    let result = ClanMemberRepository::new(db).find_by_user(user.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
