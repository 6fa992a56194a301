//! Database repository layer.
//!
//! Repositories wrap SeaORM entity queries and return domain models from
//! `server::model`, keeping entity types out of the service layer.

pub mod clan;
pub mod clan_member;
pub mod user;

#[cfg(test)]
mod test;
