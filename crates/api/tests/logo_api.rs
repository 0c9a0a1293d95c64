//! HTTP-level integration tests for logo upload, replacement and removal,
//! backed by the in-memory logo storage.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app_with_storage, create_qr_code, delete_as, get_as, png_bytes,
    post_file_as, put_json_as, test_storage, TEST_LOGO_BASE_URL,
};
use serde_json::json;
use sqlx::PgPool;

const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_object_under_tenant_path(pool: PgPool) {
    let storage = test_storage();
    let app = build_test_app_with_storage(pool, storage.clone());
    let qr = create_qr_code(app.clone(), "owner", "Logo").await;
    let id = qr["id"].as_i64().unwrap();
    let tenant_id = qr["tenant_id"].as_i64().unwrap();

    let response = post_file_as(
        app.clone(),
        &format!("/api/v1/qr-codes/{id}/logo"),
        "owner",
        "file",
        "image/png",
        &png_bytes(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let logo_url = data["logo_url"].as_str().unwrap().to_string();
    assert!(logo_url.starts_with(&format!("{TEST_LOGO_BASE_URL}/qr-logos/{tenant_id}/{id}-")));
    assert!(logo_url.ends_with(".png"));
    assert_eq!(data["qr_code"]["logo_url"], logo_url.as_str());

    let paths = storage.paths().await;
    assert_eq!(paths.len(), 1);
    let stored = storage.get(&paths[0]).await.unwrap();
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(stored.data, png_bytes());

    // A zero logo size embeds nothing.
    let uri = format!("/api/v1/qr-codes/{id}/render");
    let render = body_json(get_as(app.clone(), &uri, "owner").await).await;
    assert!(render["data"]["options"]["logo"].is_null());

    // A sized logo is embedded, excavated, and forces high error correction.
    put_json_as(
        app.clone(),
        &format!("/api/v1/qr-codes/{id}/style"),
        "owner",
        json!({ "logo_size_percent": 20, "error_correction": "L" }),
    )
    .await;
    let render = body_json(get_as(app, &format!("{uri}?size=512"), "owner").await).await;
    let options = &render["data"]["options"];
    assert_eq!(options["error_correction"], "H");
    assert_eq!(options["logo"]["src"], logo_url.as_str());
    assert_eq!(options["logo"]["width_px"], 102.4);
    assert_eq!(options["logo"]["excavate"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacing_a_logo_removes_the_old_object(pool: PgPool) {
    let storage = test_storage();
    let app = build_test_app_with_storage(pool, storage.clone());
    let id = create_qr_code(app.clone(), "owner", "Logo").await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/qr-codes/{id}/logo");

    let first = body_json(
        post_file_as(app.clone(), &uri, "owner", "file", "image/png", &png_bytes()).await,
    )
    .await["data"]["logo_url"]
        .clone();
    let second = body_json(
        post_file_as(app.clone(), &uri, "owner", "file", "image/svg+xml", SVG).await,
    )
    .await["data"]["logo_url"]
        .clone();
    assert_ne!(first, second);

    let paths = storage.paths().await;
    assert_eq!(paths.len(), 1);
    assert!(paths[0].ends_with(".svg"));

    let response = delete_as(app.clone(), &uri, "owner").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert!(data["logo_url"].is_null());
    assert!(data["qr_code"]["logo_url"].is_null());
    assert!(storage.paths().await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_uploads_are_rejected(pool: PgPool) {
    let storage = test_storage();
    let app = build_test_app_with_storage(pool, storage.clone());
    let id = create_qr_code(app.clone(), "owner", "Logo").await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/qr-codes/{id}/logo");

    // Disallowed type.
    let response = post_file_as(app.clone(), &uri, "owner", "file", "image/gif", b"GIF89a").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Content does not match the declared type.
    let response = post_file_as(app.clone(), &uri, "owner", "file", "image/png", SVG).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Wrong field name.
    let response =
        post_file_as(app.clone(), &uri, "owner", "logo", "image/png", &png_bytes()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Over the size limit.
    let mut big = png_bytes();
    big.resize(2 * 1024 * 1024 + 1, 0);
    let response = post_file_as(app, &uri, "owner", "file", "image/png", &big).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(storage.paths().await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_to_foreign_qr_code_is_forbidden(pool: PgPool) {
    let storage = test_storage();
    let app = build_test_app_with_storage(pool, storage.clone());
    let id = create_qr_code(app.clone(), "owner", "Logo").await["id"]
        .as_i64()
        .unwrap();

    let response = post_file_as(
        app,
        &format!("/api/v1/qr-codes/{id}/logo"),
        "intruder",
        "file",
        "image/png",
        &png_bytes(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(storage.paths().await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logo_shape_accepts_square_and_circle_only(pool: PgPool) {
    let app = build_test_app_with_storage(pool, test_storage());
    let id = create_qr_code(app.clone(), "owner", "Shape").await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/qr-codes/{id}/logo/shape");

    let response = put_json_as(app.clone(), &uri, "owner", json!({ "logo_shape": "circle" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["logo_shape"], "circle");

    let response = put_json_as(app, &uri, "owner", json!({ "logo_shape": "hexagon" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
