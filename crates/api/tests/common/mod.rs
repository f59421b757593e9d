#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use figures_api::config::ServerConfig;
use figures_api::router::build_app_router;
use figures_api::state::AppState;
use figures_db::models::product::{CreateProduct, Product};
use figures_db::repositories::ProductRepo;

pub const TEST_JWT_SECRET: &str = "figures-test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// Password hashing uses minimal Argon2 cost so registration stays fast.
pub fn test_config() -> ServerConfig {
    let source = |key: &str| -> Option<String> {
        let value = match key {
            "HOST" => "127.0.0.1",
            "PORT" => "0",
            "DATABASE_URL" => "postgres://unused-in-tests",
            "JWT_SECRET" => TEST_JWT_SECRET,
            "PASSWORD_HASH_MEMORY_KIB" => "8",
            "PASSWORD_HASH_ITERATIONS" => "1",
            "PASSWORD_HASH_PARALLELISM" => "1",
            _ => return None,
        };
        Some(value.to_string())
    };
    ServerConfig::from_source(source).expect("test config should load")
}

/// Build the full application router, with all middleware layers, over the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Insert a catalog product directly.
pub async fn seed_product(pool: &PgPool, name: &str, price: &str) -> Product {
    let input = CreateProduct {
        category_id: None,
        name: name.to_string(),
        description: None,
        price: price.parse::<Decimal>().expect("valid decimal"),
    };
    ProductRepo::create(pool, &input)
        .await
        .expect("product creation should succeed")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be handled")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", token)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Register a user over HTTP and return its id.
pub async fn register(app: Router, username: &str, password: &str) -> i64 {
    let body = serde_json::json!({
        "username": username,
        "password": password,
        "email": format!("{username}@example.com"),
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_i64().expect("id should be a number")
}

/// Log in over HTTP and return the token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Register and log in a user, returning `(user_id, token)`.
pub async fn signed_in_user(pool: &PgPool, username: &str) -> (i64, String) {
    let user_id = register(build_test_app(pool.clone()), username, "secret").await;
    let token = login(build_test_app(pool.clone()), username, "secret").await;
    (user_id, token)
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a plain-text subscriber writing here for the current thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Every captured line containing `needle`.
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
