use super::*;

/// Expected: the owner is listed first regardless of join order
#[tokio::test]
async fn lists_owner_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    factory::add_member(db, clan.id, first.id).await?;
    factory::add_member(db, clan.id, second.id).await?;

    let members = ClanMemberRepository::new(db).get_members(clan.id).await?;

    assert_eq!(members.len(), 3);
    assert_eq!(members[0].user.id, owner.id);
    assert_eq!(members[0].role, ClanRole::Owner);
    assert!(members[1..]
        .iter()
        .all(|member| member.role == ClanRole::Member));

    Ok(())
}

#[tokio::test]
async fn returns_empty_list_for_unknown_clan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let members = ClanMemberRepository::new(db).get_members(999).await?;

    assert!(members.is_empty());

    Ok(())
}
