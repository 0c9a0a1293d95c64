//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_with_host, PLATFORM_HOST};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["platform_host"], PLATFORM_HOST);
    assert_eq!(json["logo_bucket"], "qr-logos");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_returns_correct_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/qr-codes")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

fn preflight(uri: &str, origin: &str, method: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("Origin", origin)
        .header("Access-Control-Request-Method", method)
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_api_rejects_unlisted_origins(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(preflight("/api/v1/qr-codes", "https://shop.example.com", "POST"))
        .await
        .unwrap();

    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_pages_allow_any_origin_without_credentials(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(preflight("/api/v1/public/pages/aB3dE6gH", "https://shop.example.com", "GET"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
    assert!(response.headers().get("access-control-allow-credentials").is_none());
    let methods = response.headers().get("access-control-allow-methods").unwrap();
    assert!(!methods.to_str().unwrap().contains("POST"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_page_response_exposes_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .uri("/api/v1/public/pages/aB3dE6gH")
        .header("Origin", "https://shop.example.com")
        .header("Host", "shop.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Unknown code, but the CORS headers are still applied.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
    let exposed = response.headers().get("access-control-expose-headers").unwrap();
    assert!(exposed.to_str().unwrap().contains("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scan_redirect_carries_no_cors_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_with_host(app, "/qr/aB3dE6gH", "shop.example.com").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_requires_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/qr-codes").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tenant_is_created_on_first_request(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let first = body_json(common::get_as(app.clone(), "/api/v1/tenant", "user-1").await).await;
    let second = body_json(common::get_as(app, "/api/v1/tenant", "user-1").await).await;

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(first["data"]["owner_user_id"], "user-1");
    assert_eq!(first["data"]["name"], "user-1@example.com");
}
