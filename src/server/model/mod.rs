//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entities into these types at the data-layer boundary
//! so that services and controllers never depend on entity models directly. Each
//! domain model owns its conversion into the DTOs in `crate::model`.

pub mod clan;
pub mod oauth;
pub mod user;
