use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Expected: the clan and all of its memberships are removed, users stay
#[tokio::test]
async fn deletes_clan_and_memberships() -> Result<(), AppError> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let member = factory::create_user(db).await?;
    factory::add_member(db, clan.id, member.id).await?;

    let repo = ClanRepository::new(db);
    repo.delete(clan.id).await?;

    assert!(repo.find_by_id(clan.id).await?.is_none());
    assert_eq!(entity::prelude::ClanMember::find().count(db).await?, 0);
    assert_eq!(entity::prelude::User::find().count(db).await?, 2);

    Ok(())
}
