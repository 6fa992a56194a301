use super::*;
use crate::server::{data::clan_member::ClanMemberRepository, model::clan::ClanRole};

/// Expected: the clan is created and the creator is its owner member
#[tokio::test]
async fn creates_clan_and_owner_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;

    let repo = ClanRepository::new(db);
    let clan = repo
        .create_with_owner(CreateClanParam {
            name: "Night Watch".to_string(),
            description: Some("We guard the wall".to_string()),
            owner_id: owner.id,
        })
        .await?;

    assert_eq!(clan.name, "Night Watch");
    assert_eq!(clan.owner_id, owner.id);

    let membership = ClanMemberRepository::new(db)
        .find_by_user(owner.id)
        .await?
        .unwrap();
    assert_eq!(membership.clan_id, clan.id);
    assert_eq!(membership.role, ClanRole::Owner);

    Ok(())
}

/// Expected: a duplicate name fails and leaves no membership behind
#[tokio::test]
async fn rolls_back_on_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, existing) = factory::helpers::create_clan_with_owner(db).await?;
    let other = factory::create_user(db).await?;

    let repo = ClanRepository::new(db);
    let result = repo
        .create_with_owner(CreateClanParam {
            name: existing.name.clone(),
            description: None,
            owner_id: other.id,
        })
        .await;

    assert!(result.is_err());
    assert!(ClanMemberRepository::new(db)
        .find_by_user(other.id)
        .await?
        .is_none());

    Ok(())
}
