use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(indexed)]
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    #[sea_orm(unique)]
    pub google_id: Option<String>,
    #[sea_orm(unique)]
    pub apple_id: Option<String>,
    #[sea_orm(unique)]
    pub twitter_id: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::clan_member::Entity")]
    Membership,
}

impl Related<super::clan_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl Related<super::clan::Entity> for Entity {
    fn to() -> RelationDef {
        super::clan_member::Relation::Clan.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::clan_member::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
