#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use qrlanding_api::auth::jwt::JwtConfig;
use qrlanding_api::config::{ServerConfig, StorageBackend};
use qrlanding_api::router::build_app_router;
use qrlanding_api::state::AppState;
use qrlanding_api::storage::memory::MemoryLogoStorage;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_IP_HASH_SECRET: &str = "test-ip-hash-secret";
pub const TEST_LOGO_BASE_URL: &str = "http://storage.test";
pub const PLATFORM_HOST: &str = "app.qrlanding.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        platform_host: PLATFORM_HOST.to_string(),
        platform_owner_user_id: None,
        ip_hash_secret: TEST_IP_HASH_SECRET.to_string(),
        reject_critical_styles: false,
        storage_backend: StorageBackend::Memory,
        logo_bucket: "qr-logos".to_string(),
        logo_public_base_url: TEST_LOGO_BASE_URL.to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: None,
        },
    }
}

pub fn test_storage() -> Arc<MemoryLogoStorage> {
    Arc::new(MemoryLogoStorage::new("qr-logos", TEST_LOGO_BASE_URL))
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), test_storage())
}

/// Like [`build_test_app`] but with a caller-held storage so tests can
/// inspect uploaded objects.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<MemoryLogoStorage>) -> Router {
    build_test_app_with(pool, test_config(), storage)
}

pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    storage: Arc<MemoryLogoStorage>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };
    build_app_router(state, &config)
}

/// Sign a one-hour access token for `sub`.
pub fn token_for(sub: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": sub, "exp": exp, "email": format!("{sub}@example.com") }),
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str, user: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token_for(user)))
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Unauthenticated GET with an explicit `Host` header.
pub async fn get_with_host(app: Router, uri: &str, host: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(HOST, host)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    let request = authed(Method::GET, uri, user).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn json_as(
    app: Router,
    method: Method,
    uri: &str,
    user: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(method, uri, user)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    user: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_as(app, Method::POST, uri, user, body).await
}

pub async fn put_json_as(
    app: Router,
    uri: &str,
    user: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_as(app, Method::PUT, uri, user, body).await
}

pub async fn patch_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    let request = authed(Method::PATCH, uri, user).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_empty_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    let request = authed(Method::POST, uri, user).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    let request = authed(Method::DELETE, uri, user).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST a single multipart file field.
pub async fn post_file_as(
    app: Router,
    uri: &str,
    user: &str,
    field: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "qrlanding-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
         filename=\"logo\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = authed(Method::POST, uri, user)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a QR code through the API and return its `data` object.
pub async fn create_qr_code(app: Router, user: &str, title: &str) -> serde_json::Value {
    let response = post_json_as(app, "/api/v1/qr-codes", user, json!({ "title": title })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// A minimal valid PNG header.
pub fn png_bytes() -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0u8; 32]);
    data
}
