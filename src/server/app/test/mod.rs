use std::collections::HashMap;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::Session;

use crate::server::{
    app::{build_app, route_groups, RouteGroup, SESSION_COOKIE_NAME},
    config::Config,
    error::AppError,
    extract::AppPath,
    middleware::session::AuthSession,
    startup::{self, SyncMode},
    state::AppState,
};
use test_utils::factory;

mod errors;

const GOOGLE_ENV: [(&str, &str); 3] = [
    ("GOOGLE_CLIENT_ID", "google-client"),
    ("GOOGLE_CLIENT_SECRET", "google-secret"),
    ("GOOGLE_CALLBACK_URL", "http://localhost:8000/api/auth/google/callback"),
];

/// Full application over an in-memory database, driven with `oneshot`.
///
/// Adds a `/test` group with routes to sign in as any user, panic and fail.
struct TestApp {
    db: DatabaseConnection,
    router: Router,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// `name=value` pair of the session cookie, if one was set.
    fn session_cookie(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|cookie| cookie.split(';').next().map(str::to_string))
    }

    fn set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(SESSION_COOKIE_NAME))
            .map(str::to_string)
    }

    fn location(&self) -> String {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }
}

impl TestApp {
    /// Development environment with only Google configured.
    async fn new() -> Self {
        Self::with_env(&GOOGLE_ENV).await
    }

    async fn with_env(vars: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        vars.entry("STATIC_DIR".to_string())
            .or_insert_with(|| format!("{}/htmlPages", env!("CARGO_MANIFEST_DIR")));
        vars.entry("DATABASE_URL".to_string())
            .or_insert_with(|| "sqlite::memory:".to_string());

        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        let db = sea_orm::Database::connect(config.database_url.as_str())
            .await
            .unwrap();
        startup::sync_schema(&db, SyncMode::Create).await.unwrap();
        let session_store = startup::connect_to_session(&db).await.unwrap();

        let http_client = startup::setup_reqwest_client().unwrap();
        let oauth_clients = startup::setup_oauth_clients(&config).unwrap();
        let state = AppState::new(db.clone(), http_client, oauth_clients, config);

        let mut groups = route_groups();
        groups.push(RouteGroup::new("/test", test_routes()));

        Self {
            db,
            router: build_app(state, session_store, groups),
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let body = body.collect().await.unwrap().to_bytes().to_vec();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, cookie, None)).await
    }

    async fn post_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, cookie, Some(body))).await
    }

    async fn put_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::PUT, uri, cookie, Some(body))).await
    }

    async fn post(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::POST, uri, cookie, None)).await
    }

    async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, cookie, None)).await
    }

    /// Signs in as `user_id` and returns the session cookie.
    async fn login(&self, user_id: i32) -> String {
        let response = self.post(&format!("/test/login/{}", user_id), None).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);

        response.session_cookie().unwrap()
    }

    /// Creates a user and signs in as them.
    async fn login_new_user(&self) -> (entity::user::Model, String) {
        let user = factory::create_user(&self.db).await.unwrap();
        let cookie = self.login(user.id).await;

        (user, cookie)
    }
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn test_routes() -> Router<AppState> {
    Router::new()
        .route("/login/{id}", post(test_login))
        .route("/panic", get(test_panic))
        .route("/fail", get(test_fail))
}

async fn test_login(
    session: Session,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).login(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn test_panic() -> StatusCode {
    panic!("handler exploded")
}

async fn test_fail() -> Result<StatusCode, AppError> {
    Err(DbErr::Custom("disk on fire".to_string()).into())
}
