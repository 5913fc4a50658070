#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use murmur::config::AppConfig;
use murmur::infra::db::Db;
use murmur::AppState;

// ---------------------------------------------------------------------------
// TestApp — one fresh in-memory database per instance
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

/// Build a TestApp backed by its own in-memory SQLite database, so
/// tests are fully isolated from one another.
pub async fn app() -> TestApp {
    TestApp::setup().await
}

impl TestApp {
    async fn setup() -> Self {
        // An in-memory SQLite database lives and dies with its
        // connection, so the pool is pinned to a single connection.
        std::env::set_var("DATABASE_URL", "sqlite::memory:");
        std::env::set_var("DB_MAX_CONNECTIONS", "1");
        std::env::set_var("DB_IDLE_TIMEOUT_SECONDS", "3600");

        let config = AppConfig::from_env().expect("failed to build AppConfig");
        let db = Db::connect(&config).await.expect("Db::connect failed");

        let state = AppState { db };
        let router = murmur::http::router(state.clone());

        TestApp { router, state }
    }

    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    // ------------------------------------------------------------------
    // Convenience HTTP helpers — viewer identity travels in the query
    // ------------------------------------------------------------------
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    // ------------------------------------------------------------------
    // Seed helpers — write directly through the pool
    // ------------------------------------------------------------------
    pub async fn seed_user(&self, username: &str, avatar_url: &str) {
        sqlx::query("INSERT INTO users (username, avatar_url) VALUES (?, ?)")
            .bind(username)
            .bind(avatar_url)
            .execute(self.state.db.pool())
            .await
            .expect("failed to seed user");
    }

    pub async fn seed_comment(
        &self,
        author: &str,
        content: &str,
        parent_id: Option<i64>,
        addressee: Option<&str>,
    ) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO comments (content, author, parent_id, addressee, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(content)
        .bind(author)
        .bind(parent_id)
        .bind(addressee)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .fetch_one(self.state.db.pool())
        .await
        .expect("failed to seed comment")
    }

    /// Shift a comment's creation timestamp into the past.
    pub async fn backdate_comment(&self, id: i64, seconds_ago: i64) {
        sqlx::query("UPDATE comments SET created_at = created_at - ? WHERE id = ?")
            .bind(seconds_ago)
            .bind(id)
            .execute(self.state.db.pool())
            .await
            .expect("failed to backdate comment");
    }
}
