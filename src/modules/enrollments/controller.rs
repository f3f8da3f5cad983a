use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, PaginatedEnrollmentsResponse,
};
use super::service::EnrollmentService;

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Student or lesson does not exist"),
        (status = 409, description = "Student already enrolled in lesson")
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(dto): Json<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentFilterParams),
    responses(
        (status = 200, description = "List of enrollments", body = PaginatedEnrollmentsResponse)
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    Query(filters): Query<EnrollmentFilterParams>,
) -> Result<Json<PaginatedEnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::get_enrollments(&state.db, filters).await?;

    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment details", body = Enrollment),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::get_enrollment_by_id(&state.db, id).await?;

    Ok(Json(enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    EnrollmentService::delete_enrollment(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
