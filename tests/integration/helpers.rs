//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::DateTime;
use serde_json::Value;
use tower::ServiceExt;

use canteen_api::{AppState, build_app};
use canteen_auth::PasswordHasher;
use canteen_core::config::AppConfig;
use canteen_core::traits::ManualClock;
use canteen_database::AccountRepository;
use canteen_database::repositories::{MemorySessionRepository, MemoryUserRepository};
use canteen_entity::user::{CreateUser, UserRole};

const TEST_CONFIG: &str = r#"
    [database]
    url = "postgres://unused@localhost/canteen_test"

    [auth]
    signing_key = "integration-test-signing-key"
    password_salt = "integration-test-salt"
    access_token_ttl_seconds = 120
    refresh_token_ttl_seconds = 600

    [session]
    cleanup_interval_seconds = 0
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Account storage
    pub users: Arc<MemoryUserRepository>,
    /// Refresh session storage
    pub sessions: Arc<MemorySessionRepository>,
    /// Clock shared by every auth component
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
    /// The seeded `cashier` role
    pub cashier: UserRole,
}

impl TestApp {
    /// Create a new test application over in-memory repositories
    pub fn new() -> Self {
        let config = AppConfig::from_toml_str(TEST_CONFIG).expect("Failed to parse test config");

        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionRepository::new());
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        ));

        users.insert_role("admin");
        let cashier = users.insert_role("cashier");

        let state = AppState::new(
            config.clone(),
            users.clone(),
            sessions.clone(),
            clock.clone(),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state),
            users,
            sessions,
            clock,
            config,
            cashier,
        }
    }

    /// Create a test user with the given role and return their ID
    pub async fn create_test_user(&self, username: &str, password: &str, role_id: i64) -> i64 {
        let hasher = PasswordHasher::new(&self.config.auth);
        let hash = hasher.hash(password).expect("Failed to hash password");

        self.users
            .create_user(&CreateUser {
                role_id,
                username: username.to_string(),
                password_hash: hash,
                email: format!("{username}@canteen.test"),
                first_name: username.to_string(),
                last_name: "Test".to_string(),
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Sign in and return the response body
    pub async fn sign_in(&self, username: &str, password: &str) -> Value {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/sign-in", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );

        response.body
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send(method, path, body_str, authorization).await
    }

    /// Make an HTTP request with a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// String field from the JSON body
    pub fn str(&self, field: &str) -> &str {
        self.body
            .get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("No string field '{field}' in {:?}", self.body))
    }
}

/// String field from a JSON value
pub fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name)
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("No string field '{name}' in {body:?}"))
}
