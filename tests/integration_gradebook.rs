mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_school, generate_unique_school_name, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn post_json(
    pool: &PgPool,
    uri: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

fn id_of(body: &serde_json::Value) -> Uuid {
    body["id"].as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_gradebook_chain(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let (status, subject) = post_json(
        &pool,
        "/api/subjects",
        json!({ "name": "Mathematics", "subject_type": "core", "subject_code": "MATH101" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, lesson) = post_json(
        &pool,
        "/api/lessons",
        json!({
            "subject_id": id_of(&subject),
            "description": "Algebra I",
            "semester": "Fall",
            "year": 2026
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, assignment_type) = post_json(
        &pool,
        "/api/assignment-types",
        json!({ "lesson_id": id_of(&lesson), "name": "Homework", "percentage": 30.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, assignment) = post_json(
        &pool,
        "/api/assignments",
        json!({
            "assignment_type_id": id_of(&assignment_type),
            "name": "Problem Set 1",
            "max_points": 20
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, student) = post_json(
        &pool,
        "/api/students",
        json!({
            "school_id": school.id,
            "first_name": "Ama",
            "gender": "f",
            "nationality": "Ghanaian",
            "grade_level": "5th Grade"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, enrollment) = post_json(
        &pool,
        "/api/enrollments",
        json!({ "student_id": id_of(&student), "lesson_id": id_of(&lesson) }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment["student_id"], student["id"]);
    assert_eq!(enrollment["lesson_id"], lesson["id"]);

    let (status, score) = post_json(
        &pool,
        "/api/scores",
        json!({
            "student_id": id_of(&student),
            "assignment_id": id_of(&assignment),
            "score": 17.5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(score["score"], 17.5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_subject_name_is_conflict(pool: PgPool) {
    let (status, _) = post_json(
        &pool,
        "/api/subjects",
        json!({ "name": "Physics", "subject_type": "core" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(
        &pool,
        "/api/subjects",
        json!({ "name": "Physics", "subject_type": "elective" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_unknown_subject_is_bad_request(pool: PgPool) {
    let (status, _) = post_json(
        &pool,
        "/api/lessons",
        json!({
            "subject_id": Uuid::new_v4(),
            "description": "Orphan",
            "semester": "Fall",
            "year": 2026
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_enrollment_is_conflict(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let (_, subject) = post_json(
        &pool,
        "/api/subjects",
        json!({ "name": "Chemistry", "subject_type": "core" }),
    )
    .await;
    let (_, lesson) = post_json(
        &pool,
        "/api/lessons",
        json!({
            "subject_id": id_of(&subject),
            "description": "Organic",
            "semester": "Spring",
            "year": 2026
        }),
    )
    .await;
    let (_, student) = post_json(
        &pool,
        "/api/students",
        json!({
            "school_id": school.id,
            "first_name": "Kofi",
            "gender": "m",
            "nationality": "Ghanaian",
            "grade_level": "6th Grade"
        }),
    )
    .await;

    let enrollment = json!({ "student_id": id_of(&student), "lesson_id": id_of(&lesson) });

    let (status, _) = post_json(&pool, "/api/enrollments", enrollment.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&pool, "/api/enrollments", enrollment).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Student is already enrolled in this lesson");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_score_is_conflict_and_update_works(pool: PgPool) {
    let school = create_test_school(&pool, &generate_unique_school_name()).await;

    let (_, subject) = post_json(
        &pool,
        "/api/subjects",
        json!({ "name": "Biology", "subject_type": "core" }),
    )
    .await;
    let (_, lesson) = post_json(
        &pool,
        "/api/lessons",
        json!({
            "subject_id": id_of(&subject),
            "description": "Cells",
            "semester": "Fall",
            "year": 2026
        }),
    )
    .await;
    let (_, assignment_type) = post_json(
        &pool,
        "/api/assignment-types",
        json!({ "lesson_id": id_of(&lesson), "name": "Quiz", "percentage": 20.0 }),
    )
    .await;
    let (_, assignment) = post_json(
        &pool,
        "/api/assignments",
        json!({
            "assignment_type_id": id_of(&assignment_type),
            "name": "Quiz 1",
            "max_points": 10
        }),
    )
    .await;
    let (_, student) = post_json(
        &pool,
        "/api/students",
        json!({
            "school_id": school.id,
            "first_name": "Yaw",
            "gender": "m",
            "nationality": "Ghanaian",
            "grade_level": "6th Grade"
        }),
    )
    .await;

    let payload = json!({
        "student_id": id_of(&student),
        "assignment_id": id_of(&assignment),
        "score": 8.0
    });

    let (status, score) = post_json(&pool, "/api/scores", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(&pool, "/api/scores", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Corrections go through update, not a second insert.
    let app = setup_test_app(pool);
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/scores/{}", id_of(&score)))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "score": 9.5 })).unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["score"], 9.5);
}
