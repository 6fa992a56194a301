use crate::server::{
    data::clan::ClanRepository,
    error::AppError,
    model::clan::{CreateClanParam, UpdateClanParam},
};
use test_utils::{builder::TestBuilder, factory};

mod create_with_owner;
mod delete;
mod get_paginated;
mod name_taken;
mod update;
