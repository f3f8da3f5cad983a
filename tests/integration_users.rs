mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn create_user(app: axum::Router, payload: serde_json::Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_sets_only_its_role_flag(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = create_user(
        app,
        json!({
            "email": email,
            "password": "testpass123",
            "role": "student"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["is_student"], true);
    assert_eq!(body["is_teacher"], false);
    assert_eq!(body["is_guardian"], false);
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_without_role(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = create_user(
        app,
        json!({
            "email": generate_unique_email(),
            "password": "testpass123"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["is_student"], false);
    assert_eq!(body["is_teacher"], false);
    assert_eq!(body["is_active"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email_is_conflict(pool: PgPool) {
    let email = generate_unique_email();

    let app = setup_test_app(pool.clone());
    let response = create_user(
        app,
        json!({ "email": email, "password": "testpass123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool);
    let response = create_user(
        app,
        json!({ "email": email, "password": "otherpass456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_rejects_short_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = create_user(
        app,
        json!({ "email": generate_unique_email(), "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_filters_by_role(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    create_user(
        app,
        json!({ "email": generate_unique_email(), "password": "testpass123", "role": "teacher" }),
    )
    .await;
    let app = setup_test_app(pool.clone());
    create_user(
        app,
        json!({ "email": generate_unique_email(), "password": "testpass123", "role": "student" }),
    )
    .await;

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri("/api/users?role=teacher")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["is_teacher"], true);
}
