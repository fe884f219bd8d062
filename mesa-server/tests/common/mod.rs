//! Shared harness for integration tests: a router backed by a throwaway
//! SQLite database, plus request helpers.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use mesa_server::auth::JwtService;
use mesa_server::state::AppState;
use mesa_server::{api, db};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: tempfile::TempDir,
}

pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite:{}", dir.path().join("test.db").display());
    let pool = db::connect(&url).await.expect("db connect");

    let state = AppState {
        pool,
        jwt: JwtService::new("integration-test-secret-0123456789abcdef", 60, 7),
        table_min_capacity: 1,
        table_max_capacity: 20,
    };

    TestApp {
        router: api::create_router(state.clone()),
        state,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(t) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let request = match body {
            Some(b) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, None, Some(body)).await
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(token), Some(body))
            .await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, Some(token), None).await
    }

    /// Register an account and log in. Returns (access, refresh).
    pub async fn login_account(&self, email: &str, role: &str) -> (String, String) {
        let (status, _) = self
            .post(
                "/api/auth/register",
                json!({
                    "email": email,
                    "name": "Test Staff",
                    "password": "s3cret-pw!",
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/auth/login",
                json!({ "email": email, "password": "s3cret-pw!" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"]["refreshToken"].as_str().unwrap().to_string(),
        )
    }

    pub async fn login_admin(&self) -> (String, String) {
        self.login_account("admin@mesa.test", "ADMIN").await
    }

    /// Create a table as the given staff member. Returns (number, access token).
    pub async fn create_table(&self, staff_token: &str, number: i64) -> (i64, String) {
        let (status, body) = self
            .post_auth(
                "/api/tables",
                staff_token,
                json!({ "number": number, "capacity": 4 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["data"]["number"].as_i64().unwrap(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }
}
