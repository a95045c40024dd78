#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::categories::create_category;
use trivia_api::db::queries::questions::create_question;
use trivia_api::db::{run_migrations, NewQuestion};
use trivia_api::server::app::{build_router, AppState};

pub const CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub async fn create_test_pool() -> SqlitePool {
    // one connection kept forever, the in-memory database lives as long as it does
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to create test database");
    run_migrations(&pool).await.expect("failed to migrate");
    pool
}

/// 23 questions spread round-robin over the six categories, a few of them starting with "Which".
pub async fn create_test_app() -> TestApp {
    let pool = create_test_pool().await;
    let mut category_ids = Vec::new();
    for name in CATEGORIES {
        category_ids.push(create_category(&pool, name).await.unwrap());
    }
    for n in 0..23_usize {
        let text = if n % 5 == 0 {
            format!("Which thing is number {n}?")
        } else if n % 7 == 0 {
            format!("WHICH other thing is number {n}?")
        } else {
            format!("What is number {n}?")
        };
        let question = NewQuestion {
            question: text,
            answer: format!("Number {n}"),
            difficulty: (n % 5) as i64 + 1,
            category: category_ids[n % category_ids.len()],
        };
        create_question(&pool, &question).await.unwrap();
    }
    TestApp {
        router: build_router(AppState::new(pool.clone(), 10)),
        pool,
    }
}
