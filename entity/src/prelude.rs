pub use super::clan::Entity as Clan;
pub use super::clan_member::Entity as ClanMember;
pub use super::user::Entity as User;
