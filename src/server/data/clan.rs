//! Clan data repository for database operations.
//!
//! Clan rows and the owner's membership row are always written together inside a
//! transaction so a clan never exists without its owner as a member.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::clan_member::ClanMemberRepository,
    error::AppError,
    model::clan::{
        Clan, ClanRole, ClanSummary, CreateClanParam, PaginatedClans, UpdateClanParam,
    },
};

pub struct ClanRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClanRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a clan and adds its owner as the first member.
    ///
    /// # Returns
    /// - `Ok(Clan)` - The created clan
    /// - `Err(AppError::DbErr)` - Database error; nothing is written
    pub async fn create_with_owner(&self, param: CreateClanParam) -> Result<Clan, AppError> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let entity = entity::clan::ActiveModel {
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            owner_id: ActiveValue::Set(param.owner_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ClanMemberRepository::new(&txn)
            .add(entity.id, param.owner_id, ClanRole::Owner)
            .await?;

        txn.commit().await?;

        Ok(Clan::from_entity(entity))
    }

    /// Finds a clan by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Clan>, DbErr> {
        let entity = entity::prelude::Clan::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Clan::from_entity))
    }

    /// Finds the clan owned by a user.
    pub async fn find_by_owner(&self, owner_id: i32) -> Result<Option<Clan>, DbErr> {
        let entity = entity::prelude::Clan::find()
            .filter(entity::clan::Column::OwnerId.eq(owner_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Clan::from_entity))
    }

    /// Checks whether a clan name is in use, ignoring the clan `except_id`.
    pub async fn name_taken(&self, name: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Clan::find().filter(entity::clan::Column::Name.eq(name));

        if let Some(id) = except_id {
            query = query.filter(entity::clan::Column::Id.ne(id));
        }

        let count = query.count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets one page of clans ordered by name, with member counts.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `entries` - Number of clans per page
    ///
    /// # Returns
    /// - `Ok(PaginatedClans)` - The requested page with totals
    /// - `Err(DbErr)` - Database error during pagination or counting
    pub async fn get_paginated(&self, page: u64, entries: u64) -> Result<PaginatedClans, DbErr> {
        let paginator = entity::prelude::Clan::find()
            .order_by_asc(entity::clan::Column::Name)
            .paginate(self.db, entries);

        let totals = paginator.num_items_and_pages().await?;
        let entities = paginator.fetch_page(page).await?;

        let members = ClanMemberRepository::new(self.db);
        let mut clans = Vec::with_capacity(entities.len());
        for entity in entities {
            let member_count = members.count(entity.id).await?;
            clans.push(ClanSummary {
                clan: Clan::from_entity(entity),
                member_count,
            });
        }

        Ok(PaginatedClans {
            clans,
            total: totals.number_of_items,
            total_pages: totals.number_of_pages,
            page,
            entries,
        })
    }

    /// Applies an update. Fields set to `None` are left unchanged.
    ///
    /// # Returns
    /// - `Ok(Clan)` - The updated clan
    /// - `Err(DbErr::RecordNotFound)` - No clan with that ID
    pub async fn update(&self, id: i32, param: UpdateClanParam) -> Result<Clan, DbErr> {
        let entity = entity::prelude::Clan::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Clan with id {} not found", id)))?;

        let mut active_model: entity::clan::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active_model.description = ActiveValue::Set(description);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(Clan::from_entity(entity))
    }

    /// Deletes a clan and all of its memberships.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        ClanMemberRepository::new(&txn).remove_all(id).await?;
        entity::prelude::Clan::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }
}
