//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce the
//! membership and ownership rules, coordinate repository calls and talk to the
//! OAuth providers, working with domain models rather than DTOs or entities.

pub mod clan;
pub mod oauth;
pub mod user;
