//! Data transfer objects exchanged with API clients.

pub mod api;
pub mod auth;
pub mod clan;
pub mod user;
