mod clan;
mod clan_member;
mod user;
