//! SeaORM entity definitions for users, clans and clan membership.
//!
//! A user may belong to at most one clan at a time, enforced by the unique
//! `user_id` column on `clan_member`.

pub mod clan;
pub mod clan_member;
pub mod prelude;
pub mod user;
