use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, OAuthFlowSession},
    },
    model::oauth::Provider,
};
use test_utils::{builder::TestBuilder, factory};
