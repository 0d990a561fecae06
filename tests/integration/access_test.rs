//! Integration tests for role-gated routing.

mod helpers;

use axum::http::{Method, Request, StatusCode};

#[tokio::test]
async fn test_client_token_cannot_reach_admin_endpoints() {
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
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "CLIENT");

    let token = app.login("ana@x.com", "secret1").await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app.request("GET", "/api/admin/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_listings() {
    let app = helpers::TestApp::new().await;
    let admin = app.token_for("admin", "root@x.com").await;
    app.register("client", "ana@x.com", "secret1").await;
    app.register("client", "bob@x.com", "secret1").await;

    let users = app.request("GET", "/api/admin/users", None, Some(&admin)).await;
    assert_eq!(users.status, StatusCode::OK);
    let users = users.body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
    assert!(users.iter().all(|u| u["enabled"] == true));

    let clients = app
        .request("GET", "/api/admin/clients", None, Some(&admin))
        .await;
    assert_eq!(clients.status, StatusCode::OK);
    let emails: Vec<&str> = clients
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["email"].as_str())
        .collect();
    assert_eq!(emails.len(), 2);
    assert!(emails.contains(&"ana@x.com"));
    assert!(emails.contains(&"bob@x.com"));
}

#[tokio::test]
async fn test_admin_user_lookup() {
    let app = helpers::TestApp::new().await;
    let admin = app.token_for("admin", "root@x.com").await;
    let ana = app.register("client", "ana@x.com", "secret1").await;
    let id = ana.body["id"].as_str().unwrap();

    let found = app
        .request("GET", &format!("/api/admin/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["email"], "ana@x.com");
    assert_eq!(found.body["role"], "CLIENT");

    let missing = app
        .request(
            "GET",
            "/api/admin/users/00000000-0000-0000-0000-000000000000",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/admin/users/42", None, Some(&admin))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_endpoints() {
    let app = helpers::TestApp::new().await;
    let client = app.token_for("client", "ana@x.com").await;
    let admin = app.token_for("admin", "root@x.com").await;

    let dashboard = app
        .request("GET", "/api/client/dashboard", None, Some(&client))
        .await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert_eq!(dashboard.text, "Welcome to Client Dashboard, ana@x.com!");

    let profile = app
        .request("GET", "/api/client/profile", None, Some(&admin))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.text, "Your Profile: root@x.com");

    let anonymous = app.request("GET", "/api/client/dashboard", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_anonymous() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("admin", "root@x.com").await;

    let (head, signature) = token.rsplit_once('.').unwrap();
    let first = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{head}.{first}{}", &signature[1..]);

    let response = app
        .request("GET", "/api/admin/users", None, Some(&tampered))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Public endpoints still work with a bad token.
    let health = app.request("GET", "/api/health", None, Some(&tampered)).await;
    assert_eq!(health.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = helpers::TestApp::new().await;
    let mut other_config = helpers::test_config();
    other_config.auth.jwt_secret = "some-other-secret".to_string();
    let other = helpers::TestApp::with_config(other_config).await;
    let foreign = other.token_for("admin", "root@x.com").await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&foreign))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_anonymous() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("admin", "root@x.com").await;

    let builder = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/users")
        .header("Authorization", format!("Token {token}"));
    let response = app.send_raw(builder, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_health() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}

#[tokio::test]
async fn test_unmatched_path_denied_by_default() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("admin", "root@x.com").await;

    let anonymous = app.request("GET", "/api/unknown", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let authenticated = app.request("GET", "/api/unknown", None, Some(&token)).await;
    assert_eq!(authenticated.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unmatched_path_permitted_when_configured() {
    let app = helpers::TestApp::permissive().await;

    let response = app.request("GET", "/api/unknown", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let gated = app.request("GET", "/api/admin/users", None, None).await;
    assert_eq!(gated.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cors_preflight_bypasses_access_rules() {
    let app = helpers::TestApp::new().await;

    let builder = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/admin/users")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "authorization");
    let response = app.send_raw(builder, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(response.headers["access-control-allow-credentials"], "true");
}
