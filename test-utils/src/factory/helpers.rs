//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user and a clan owned by them, including the owner membership row.
///
/// # Returns
/// - `Ok((owner, clan))` - The created owner and clan
/// - `Err(DbErr)` - Database error during creation
pub async fn create_clan_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::clan::Model), DbErr> {
    let owner = crate::factory::user::create_user(db).await?;
    let clan = crate::factory::clan::create_clan(db, owner.id).await?;

    Ok((owner, clan))
}
