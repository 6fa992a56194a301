use crate::server::{
    data::clan_member::ClanMemberRepository, error::AppError, model::clan::ClanRole,
};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod get_members;
mod remove;
