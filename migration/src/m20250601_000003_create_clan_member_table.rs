use sea_orm_migration::{prelude::*, schema::*};

use super::{m20250601_000001_create_user_table::User, m20250601_000002_create_clan_table::Clan};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClanMember::Table)
                    .if_not_exists()
                    .col(integer(ClanMember::ClanId))
                    .col(integer_uniq(ClanMember::UserId))
                    .col(string_len(ClanMember::Role, 16))
                    .col(timestamp_with_time_zone(ClanMember::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(ClanMember::ClanId)
                            .col(ClanMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clan_member_clan_id")
                            .from(ClanMember::Table, ClanMember::ClanId)
                            .to(Clan::Table, Clan::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clan_member_user_id")
                            .from(ClanMember::Table, ClanMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClanMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClanMember {
    Table,
    ClanId,
    UserId,
    Role,
    JoinedAt,
}
