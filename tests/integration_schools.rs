mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_school, generate_unique_school_name, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_school(pool: PgPool) {
    let app = setup_test_app(pool);
    let school_name = generate_unique_school_name();

    let request = Request::builder()
        .method("POST")
        .uri("/api/schools")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": school_name,
                "address": "123 Test St",
                "email": "office@test.com",
                "phone": "0200000000"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["name"], school_name);
    assert_eq!(body["address"], "123 Test St");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_school_rejects_invalid_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/schools")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": generate_unique_school_name(),
                "address": "123 Test St",
                "email": "not-an-email",
                "phone": "0200000000"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_school_by_id(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/schools/{}", school.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["id"], school.id.to_string());
    assert_eq!(body["name"], school.name);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_missing_school_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/schools/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_schools_with_name_filter(pool: PgPool) {
    create_test_school(&pool, "Accra Academy North").await;
    create_test_school(&pool, "Accra Academy South").await;
    create_test_school(&pool, "Kumasi High").await;

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri("/api/schools?name=Accra")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_school_keeps_unset_fields(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/schools/{}", school.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "phone": "0555555555" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["phone"], "0555555555");
    assert_eq!(body["name"], school.name);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_school(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/schools/{}", school.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/schools/{}", school.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
