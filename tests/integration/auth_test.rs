//! Integration tests for registration, login, and the current-user endpoint.

mod helpers;

use axum::http::StatusCode;

use chicadish_entity::user::Role;

#[tokio::test]
async fn test_register_client_then_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register/client",
            Some(serde_json::json!({
                "firstName": "Ana",
                "lastName": "Lee",
                "email": "ana@x.com",
                "password": "secret1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["role"], "CLIENT");
    assert_eq!(response.body["type"], "Bearer");
    assert_eq!(response.body["email"], "ana@x.com");
    assert_eq!(response.body["firstName"], "Ana");
    assert_eq!(response.body["newsletterSubscribed"], true);
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(response.body.get("password").is_none());

    let token = app.login("ana@x.com", "secret1").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_registration_token_authenticates() {
    let app = helpers::TestApp::new().await;
    let response = app.register("admin", "root@x.com", "secret1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "ADMIN");

    let token = response.body["token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "root@x.com");
}

#[tokio::test]
async fn test_newsletter_choice_is_reported_on_login() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/register/client",
            Some(serde_json::json!({
                "firstName": "Ana",
                "lastName": "Lee",
                "email": "ana@x.com",
                "password": "secret1",
                "newsletterSubscribed": false,
            })),
            None,
        )
        .await;
    assert_eq!(response.body["newsletterSubscribed"], false);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "ana@x.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["newsletterSubscribed"], false);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = helpers::TestApp::new().await;
    let first = app.register("client", "ana@x.com", "secret1").await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.register("admin", "ana@x.com", "another1").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");

    let stored = app
        .stores
        .users
        .find_by_email("ana@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id.to_string(), first.body["id"].as_str().unwrap());
    assert!(stored.has_role(Role::Client));
    assert!(!stored.has_role(Role::Admin));

    app.login("ana@x.com", "secret1").await;
}

#[tokio::test]
async fn test_email_is_case_sensitive() {
    let app = helpers::TestApp::new().await;
    app.register("client", "ana@x.com", "secret1").await;

    let other = app.register("client", "ANA@x.com", "secret1").await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_match() {
    let app = helpers::TestApp::new().await;
    app.register("client", "ana@x.com", "secret1").await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "ana@x.com", "password": "wrong12" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nobody@x.com", "password": "secret1" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn test_registration_validation() {
    let app = helpers::TestApp::new().await;

    let cases = [
        serde_json::json!({ "firstName": "Ana", "lastName": "Lee", "email": "ana@x.com", "password": "12345" }),
        serde_json::json!({ "firstName": " ", "lastName": "Lee", "email": "ana@x.com", "password": "secret1" }),
        serde_json::json!({ "firstName": "Ana", "lastName": "Lee", "email": "not-an-email", "password": "secret1" }),
        serde_json::json!({ "firstName": "Ana", "lastName": "x".repeat(51), "email": "ana@x.com", "password": "secret1" }),
        serde_json::json!({ "lastName": "Lee", "email": "ana@x.com", "password": "secret1" }),
    ];

    for body in cases {
        let response = app
            .request("POST", "/api/auth/register/client", Some(body.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    assert!(app.stores.users.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_validation() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreadable_bodies_keep_their_status() {
    let app = helpers::TestApp::new().await;
    let login = r#"{"email":"ana@x.com","password":"secret1"}"#;

    let syntax = app
        .post_raw("/api/auth/login", Some("application/json"), "{\"email\":")
        .await;
    assert_eq!(syntax.status, StatusCode::BAD_REQUEST);
    assert_eq!(syntax.body["error"], "VALIDATION_ERROR");

    let plain = app.post_raw("/api/auth/login", Some("text/plain"), login).await;
    assert_eq!(plain.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(plain.body["error"], "UNSUPPORTED_MEDIA_TYPE");

    let missing = app.post_raw("/api/auth/login", None, login).await;
    assert_eq!(missing.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_me_returns_identity_without_token() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("client", "ana@x.com").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "ana@x.com");
    assert_eq!(response.body["role"], "CLIENT");
    assert!(response.body["token"].is_null());
    assert!(response.body["type"].is_null());
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers["www-authenticate"], "Bearer");

    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_registration_can_be_disabled() {
    let mut config = helpers::test_config();
    config.auth.allow_admin_registration = false;
    let app = helpers::TestApp::with_config(config).await;

    let admin = app.register("admin", "root@x.com", "secret1").await;
    assert_eq!(admin.status, StatusCode::FORBIDDEN);

    let client = app.register("client", "ana@x.com", "secret1").await;
    assert_eq!(client.status, StatusCode::OK);
}
