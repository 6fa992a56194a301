//! Clans Test Utils
//!
//! Shared testing utilities for the clans server. Provides a builder for test contexts
//! backed by in-memory SQLite databases, and factories for inserting users, clans and
//! memberships with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_clan_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_clan_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (owner, clan) = factory::helpers::create_clan_with_owner(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
