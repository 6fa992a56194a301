//! Startup routines: database connection and schema sync, session store, HTTP
//! client and OAuth clients.

use axum::Router;
use cookie::Key;
use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret, ExtraTokenFields, RedirectUrl, TokenUrl,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    app,
    config::{Config, Environment, OAuthCredentials},
    error::{config::ConfigError, AppError},
    state::{AppState, IdTokenFields, OAuth2Client, OAuthClients},
};

const MIN_KEY_MATERIAL: usize = 32;

/// How the schema is brought in line with the entity models on boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Create missing tables and indexes, leave existing ones untouched.
    Create,
    /// Run pending migrations, altering existing tables.
    Alter,
}

impl SyncMode {
    /// Development alters the schema, every other environment only creates.
    pub fn for_environment(environment: &Environment) -> Self {
        if environment.is_development() {
            Self::Alter
        } else {
            Self::Create
        }
    }
}

/// Connects to the Sqlite database and synchronizes the schema.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with the schema in place
/// - `Err(AppError::DbErr)` - Failed to connect or to sync the schema
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    sync_schema(&db, SyncMode::for_environment(&config.environment)).await?;

    Ok(db)
}

/// Runs every boot step that does not touch the network and assembles the router.
///
/// The caller binds the port only once this returns, so a failed database
/// connection or schema sync never leaves a listening server behind.
///
/// # Returns
/// - `Ok(Router)` - Application ready to be served
/// - `Err(AppError::DbErr)` - Database connection, schema sync or session store failed
/// - `Err(AppError::ConfigErr)` - An OAuth provider URL does not parse
pub async fn prepare_app(config: Config) -> Result<Router, AppError> {
    let db = connect_to_database(&config).await?;
    tracing::info!("Database synchronized");

    let session_store = connect_to_session(&db).await?;
    let http_client = setup_reqwest_client()?;
    let oauth_clients = setup_oauth_clients(&config)?;

    let state = AppState::new(db, http_client, oauth_clients, config);

    Ok(app::build_app(state, session_store, app::route_groups()))
}

/// Brings the schema in line with the entity models.
pub async fn sync_schema(db: &DatabaseConnection, mode: SyncMode) -> Result<(), AppError> {
    match mode {
        SyncMode::Alter => {
            use migration::{Migrator, MigratorTrait};

            Migrator::up(db, None).await?;
        }
        SyncMode::Create => {
            create_table(db, entity::prelude::User).await?;
            create_table(db, entity::prelude::Clan).await?;
            create_table(db, entity::prelude::ClanMember).await?;
        }
    }

    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), AppError> {
    let schema = Schema::new(db.get_database_backend());

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(&table).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(&index).await?;
    }

    Ok(())
}

/// Creates the session store on the application's database and migrates its table.
pub async fn connect_to_session(db: &DatabaseConnection) -> Result<SqliteStore, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|err| DbErr::Custom(format!("Failed to migrate session store: {}", err)))?;

    Ok(session_store)
}

/// Derives the cookie signing key from the session secret.
///
/// Key derivation needs at least 32 bytes of master material, so shorter secrets
/// are padded with zeros before being expanded with HKDF.
pub fn session_key(secret: &str) -> Key {
    let mut material = secret.as_bytes().to_vec();
    if material.len() < MIN_KEY_MATERIAL {
        material.resize(MIN_KEY_MATERIAL, 0);
    }

    Key::derive_from(&material)
}

/// Builds the HTTP client used for provider API calls.
///
/// Redirects are disabled so provider responses cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds an OAuth2 client for every configured provider.
///
/// # Returns
/// - `Ok(OAuthClients)` - Clients for configured providers, `None` for the rest
/// - `Err(AppError::ConfigErr)` - A configured URL does not parse
pub fn setup_oauth_clients(config: &Config) -> Result<OAuthClients, AppError> {
    let google = config
        .google
        .as_ref()
        .map(|credentials| build_client(credentials, "GOOGLE"))
        .transpose()?;

    let apple = config
        .apple
        .as_ref()
        .map(|credentials| {
            build_client::<IdTokenFields>(credentials, "APPLE")
                .map(|client| client.set_auth_type(AuthType::RequestBody))
        })
        .transpose()?;

    let twitter = config
        .twitter
        .as_ref()
        .map(|credentials| build_client(credentials, "TWITTER"))
        .transpose()?;

    Ok(OAuthClients {
        google,
        apple,
        twitter,
    })
}

fn build_client<TF: ExtraTokenFields>(
    credentials: &OAuthCredentials,
    prefix: &str,
) -> Result<OAuth2Client<TF>, AppError> {
    let auth_url = AuthUrl::new(credentials.auth_url.clone())
        .map_err(|source| invalid_url(format!("{}_AUTH_URL", prefix), source))?;
    let token_url = TokenUrl::new(credentials.token_url.clone())
        .map_err(|source| invalid_url(format!("{}_TOKEN_URL", prefix), source))?;
    let redirect_url = RedirectUrl::new(credentials.callback_url.clone())
        .map_err(|source| invalid_url(format!("{}_CALLBACK_URL", prefix), source))?;

    let client = oauth2::Client::new(ClientId::new(credentials.client_id.clone()))
        .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}

fn invalid_url(name: String, source: url::ParseError) -> AppError {
    ConfigError::InvalidUrl { name, source }.into()
}
