use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clan::Table)
                    .if_not_exists()
                    .col(pk_auto(Clan::Id))
                    .col(string_uniq(Clan::Name))
                    .col(text_null(Clan::Description))
                    .col(integer(Clan::OwnerId))
                    .col(timestamp_with_time_zone(Clan::CreatedAt))
                    .col(timestamp_with_time_zone(Clan::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clan_owner_id")
                            .from(Clan::Table, Clan::OwnerId)
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
            .drop_table(Table::drop().table(Clan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Clan {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
