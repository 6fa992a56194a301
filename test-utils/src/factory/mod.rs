//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` shorthand
//! for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .name("Ada")
//!     .google_id("google-123")
//!     .build()
//!     .await?;
//!
//! let (owner, clan) = factory::helpers::create_clan_with_owner(&db).await?;
//! factory::clan::add_member(&db, clan.id, member.id).await?;
//! ```

pub mod clan;
pub mod helpers;
pub mod user;

pub use clan::{add_member, create_clan};
pub use user::create_user;
