//! Shared test helpers for integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use chicadish_core::config::{AppConfig, FallbackPolicy};
use chicadish_database::{Stores, seed_roles};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Stores backing the app, for direct inspection
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with the default (deny) fallback
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application whose unmatched paths are permitted
    pub async fn permissive() -> Self {
        let mut config = test_config();
        config.auth.fallback_policy = FallbackPolicy::Permit;
        Self::with_config(config).await
    }

    /// Create a test application from an explicit config over fresh in-memory stores
    pub async fn with_config(config: AppConfig) -> Self {
        let stores = Stores::in_memory();
        seed_roles(stores.roles.as_ref())
            .await
            .expect("Failed to seed roles");

        let state = chicadish_api::AppState::new(config.clone(), stores.clone())
            .expect("Failed to build app state");
        let router = chicadish_api::build_app(state);

        Self {
            router,
            stores,
            config,
        }
    }

    /// Register through `/api/auth/register/{kind}` and return the response
    pub async fn register(&self, kind: &str, email: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": password,
        });
        self.request("POST", &format!("/api/auth/register/{kind}"), Some(body), None)
            .await
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Register a user of the given kind and return a fresh login token
    pub async fn token_for(&self, kind: &str, email: &str) -> String {
        let response = self.register(kind, email, "secret1").await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        self.login(email, "secret1").await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let req = Request::builder().method(method).uri(path);
        let req = match token {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        };
        self.send_raw(req, body).await
    }

    /// Make a request with a caller-supplied builder (custom headers)
    pub async fn send_raw(
        &self,
        builder: axum::http::request::Builder,
        body: Option<Value>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = builder
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.dispatch(req).await
    }

    /// POST a raw body with an optional content type
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let req = Request::builder().method("POST").uri(path);
        let req = match content_type {
            Some(content_type) => req.header("Content-Type", content_type),
            None => req,
        };
        let req = req.body(body.into()).expect("Failed to build request");

        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Config with cheap password hashing
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.password_memory_kib = 8;
    config.auth.password_iterations = 1;
    config.auth.password_parallelism = 1;
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body text
    pub text: String,
}
