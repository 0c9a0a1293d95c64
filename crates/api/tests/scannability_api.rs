//! HTTP-level integration tests for the stateless `/api/v1/scannability`
//! endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_as, post_json_as};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_style_is_low_risk(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json_as(app, "/api/v1/scannability/assess", "user", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["risk_level"], "low");
    assert_eq!(data["is_valid"], true);
    assert_eq!(data["warnings"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_logo_is_critical(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json_as(
        app,
        "/api/v1/scannability/assess",
        "user",
        json!({ "logo_size_percent": 36 }),
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["risk_level"], "critical");
    assert_eq!(data["is_valid"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_fields_and_hard_bounds_are_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json_as(
        app.clone(),
        "/api/v1/scannability/assess",
        "user",
        json!({ "logo_size_percent": 45 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_as(
        app,
        "/api/v1/scannability/assess",
        "user",
        json!({ "logo_size": 10 }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn auto_adjust_reports_before_and_after(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json_as(
        app,
        "/api/v1/scannability/auto-adjust",
        "user",
        json!({ "logo_size_percent": 40, "corner_radius_level": 10, "module_color": "#f0f0f0" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["original"]["logo_size_percent"], 40);
    assert_eq!(data["original_assessment"]["risk_level"], "critical");
    assert!(data["adjusted"]["logo_size_percent"].as_i64().unwrap() <= 30);
    assert!(data["adjusted"]["corner_radius_level"].as_i64().unwrap() <= 5);
    assert_eq!(data["adjusted"]["module_color"], "#000000");
    assert_eq!(data["assessment"]["is_valid"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn limits_expose_the_threshold_table(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/v1/scannability/limits").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let data = body_json(get_as(app, "/api/v1/scannability/limits", "user").await).await["data"]
        .clone();
    assert_eq!(data["logo_size"]["critical"], 35);
    assert_eq!(data["corner_radius"]["maximum"], 5);
    assert_eq!(data["color_contrast"]["minimum"], 4.5);
}
