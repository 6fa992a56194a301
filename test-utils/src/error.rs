use thiserror::Error;

/// Errors that can occur while setting up a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to the in-memory database, creating tables or migrating the
    /// session store table failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
