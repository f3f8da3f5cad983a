mod common;

use std::collections::HashSet;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_pin, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

const PIN_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

async fn redeem(app: axum::Router, pin: &str, user_id: Uuid) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/signup-pins/redeem")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "pin": pin,
                "user_id": user_id
            }))
            .unwrap(),
        ))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_generate_pins_issues_distinct_unused_pins(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/api/signup-pins/generate")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "count": 10 })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let pins: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let pins = pins.as_array().unwrap();
    assert_eq!(pins.len(), 10);

    let mut seen = HashSet::new();
    for pin in pins {
        let code = pin["pin"].as_str().unwrap();
        assert_eq!(code.len(), 10);
        assert!(code.chars().all(|c| PIN_ALPHABET.contains(c)));
        assert_eq!(pin["is_used"], false);
        assert!(pin["user_id"].is_null());
        assert!(seen.insert(code.to_string()), "duplicate pin issued: {code}");
    }

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM signup_pins")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_generate_pins_rejects_zero_count(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/signup-pins/generate")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "count": 0 })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_redeem_fresh_pin_links_account(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email()).await;
    create_test_pin(&pool, "ABC123XYZ0").await;

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "ABC123XYZ0", user.id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["pin"], "ABC123XYZ0");
    assert_eq!(body["is_used"], true);
    assert_eq!(body["user_id"], user.id.to_string());

    let (is_used, user_id): (bool, Option<Uuid>) =
        sqlx::query_as("SELECT is_used, user_id FROM signup_pins WHERE pin = $1")
            .bind("ABC123XYZ0")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_used);
    assert_eq!(user_id, Some(user.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_redeem_used_pin_is_conflict_and_keeps_linkage(pool: PgPool) {
    let first = create_test_user(&pool, &generate_unique_email()).await;
    let second = create_test_user(&pool, &generate_unique_email()).await;
    create_test_pin(&pool, "USEDPIN001").await;

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "USEDPIN001", first.id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "USEDPIN001", second.id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Signup PIN has already been used");

    // The losing redemption must not disturb the original linkage.
    let (is_used, user_id): (bool, Option<Uuid>) =
        sqlx::query_as("SELECT is_used, user_id FROM signup_pins WHERE pin = $1")
            .bind("USEDPIN001")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_used);
    assert_eq!(user_id, Some(first.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_redemptions_have_exactly_one_winner(pool: PgPool) {
    let first = create_test_user(&pool, &generate_unique_email()).await;
    let second = create_test_user(&pool, &generate_unique_email()).await;
    create_test_pin(&pool, "RACEPIN001").await;

    let app_a = setup_test_app(pool.clone());
    let app_b = setup_test_app(pool.clone());

    let (response_a, response_b) = tokio::join!(
        redeem(app_a, "RACEPIN001", first.id),
        redeem(app_b, "RACEPIN001", second.id)
    );

    let statuses = [response_a.status(), response_b.status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "expected exactly one winner, got {statuses:?}"
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count(),
        1,
        "expected exactly one loser, got {statuses:?}"
    );

    // The winner's linkage persisted; the loser left no trace.
    let winner = if statuses[0] == StatusCode::OK {
        first.id
    } else {
        second.id
    };
    let (is_used, user_id): (bool, Option<Uuid>) =
        sqlx::query_as("SELECT is_used, user_id FROM signup_pins WHERE pin = $1")
            .bind("RACEPIN001")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_used);
    assert_eq!(user_id, Some(winner));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_linked_but_unused_pin_is_never_reassigned(pool: PgPool) {
    let holder = create_test_user(&pool, &generate_unique_email()).await;
    let intruder = create_test_user(&pool, &generate_unique_email()).await;

    sqlx::query("INSERT INTO signup_pins (pin, user_id) VALUES ($1, $2)")
        .bind("LINKEDPIN1")
        .bind(holder.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "LINKEDPIN1", intruder.id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let (is_used, user_id): (bool, Option<Uuid>) =
        sqlx::query_as("SELECT is_used, user_id FROM signup_pins WHERE pin = $1")
            .bind("LINKEDPIN1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!is_used);
    assert_eq!(user_id, Some(holder.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_redeem_unknown_pin_is_not_found(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email()).await;

    let app = setup_test_app(pool);
    let response = redeem(app, "ZZZZZZZZZZ", user.id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Signup PIN not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_account_cannot_redeem_two_pins(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email()).await;
    create_test_pin(&pool, "FIRSTPIN01").await;
    create_test_pin(&pool, "SECONDPIN2").await;

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "FIRSTPIN01", user.id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "SECONDPIN2", user.id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The second PIN stays redeemable by someone else.
    let (is_used, user_id): (bool, Option<Uuid>) =
        sqlx::query_as("SELECT is_used, user_id FROM signup_pins WHERE pin = $1")
            .bind("SECONDPIN2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!is_used);
    assert_eq!(user_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_redeem_with_unknown_account_is_bad_request(pool: PgPool) {
    create_test_pin(&pool, "ORPHANPIN1").await;

    let app = setup_test_app(pool);
    let response = redeem(app, "ORPHANPIN1", Uuid::new_v4()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_pins_filters_by_usage(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email()).await;
    create_test_pin(&pool, "LISTPIN001").await;
    create_test_pin(&pool, "LISTPIN002").await;
    create_test_pin(&pool, "LISTPIN003").await;

    let app = setup_test_app(pool.clone());
    let response = redeem(app, "LISTPIN002", user.id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("GET")
        .uri("/api/signup-pins?is_used=false")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["meta"]["total"], 2);
    for pin in body["data"].as_array().unwrap() {
        assert_eq!(pin["is_used"], false);
    }

    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri("/api/signup-pins?is_used=true")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["pin"], "LISTPIN002");
}
