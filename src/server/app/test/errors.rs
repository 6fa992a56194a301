use super::*;

/// Expected: a panic becomes a 500 with the cause exposed in development
#[tokio::test]
async fn panic_is_internal_error() {
    let mut env = GOOGLE_ENV.to_vec();
    env.push(("NODE_ENV", "development"));
    let app = TestApp::with_env(&env).await;

    let response = app.get("/test/panic", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "An unexpected error occurred");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("handler exploded"));
}

#[tokio::test]
async fn development_exposes_cause_chain() {
    let mut env = GOOGLE_ENV.to_vec();
    env.push(("NODE_ENV", "development"));
    let app = TestApp::with_env(&env).await;

    let response = app.get("/test/fail", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["message"], "An unexpected error occurred");
    assert!(body["error"].as_str().unwrap().contains("disk on fire"));
}

/// Expected: without NODE_ENV the cause chain stays out of the body
#[tokio::test]
async fn unset_environment_omits_error_field() {
    let app = TestApp::new().await;

    let response = app.get("/test/fail", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["message"], "An unexpected error occurred");
    assert!(body.get("error").is_none());

    let panic = app.get("/test/panic", None).await.json();
    assert!(panic.get("error").is_none());
}

#[tokio::test]
async fn production_omits_error_field() {
    let mut env = GOOGLE_ENV.to_vec();
    env.push(("NODE_ENV", "production"));
    let app = TestApp::with_env(&env).await;

    for path in ["/test/panic", "/test/fail", "/missing"] {
        let body = app.get(path, None).await.json();

        assert_eq!(body["success"], false);
        assert!(body.get("error").is_none(), "{}", path);
    }
}

/// Expected: any environment other than development hides the error field
#[tokio::test]
async fn other_environment_omits_error_field() {
    let mut env = GOOGLE_ENV.to_vec();
    env.push(("NODE_ENV", "test"));
    let app = TestApp::with_env(&env).await;

    let body = app.get("/test/fail", None).await.json();

    assert!(body.get("error").is_none());
}

/// Expected: malformed JSON keeps the rejection's status inside the envelope
#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_new_user().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clans")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_new_user().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clans")
        .header(header::COOKIE, &cookie)
        .body(Body::from("{\"name\":\"Wolves\"}"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn schema_mismatch_is_unprocessable() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_new_user().await;

    let response = app
        .post_json("/api/clans", Some(&cookie), serde_json::json!({ "name": 42 }))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["success"], false);
}
