use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Expected: the user and their membership row are removed, the clan stays
#[tokio::test]
async fn deletes_user_and_membership() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_clan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
    let member = factory::create_user(db).await?;
    factory::add_member(db, clan.id, member.id).await?;

    let repo = UserRepository::new(db);
    repo.delete(member.id).await?;

    assert!(repo.find_by_id(member.id).await?.is_none());
    assert_eq!(entity::prelude::ClanMember::find().count(db).await?, 1);
    assert_eq!(entity::prelude::Clan::find().count(db).await?, 1);

    Ok(())
}
