use crate::server::{
    data::user::UserRepository,
    model::oauth::{OAuthProfile, Provider},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_by_id;
mod update_profile;
mod upsert_from_profile;

fn profile(provider: Provider, provider_user_id: &str) -> OAuthProfile {
    OAuthProfile {
        provider,
        provider_user_id: provider_user_id.to_string(),
        name: Some("Ada Lovelace".to_string()),
        email: None,
        avatar_url: None,
        username: None,
    }
}
