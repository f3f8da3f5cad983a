use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    Assignment, AssignmentFilterParams, CreateAssignmentDto, PaginatedAssignmentsResponse,
    UpdateAssignmentDto,
};
use super::service::AssignmentService;

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 400, description = "Assignment type does not exist"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state, dto))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(dto): Json<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let assignment = AssignmentService::create_assignment(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(AssignmentFilterParams),
    responses(
        (status = 200, description = "List of assignments", body = PaginatedAssignmentsResponse)
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignments(
    State(state): State<AppState>,
    Query(filters): Query<AssignmentFilterParams>,
) -> Result<Json<PaginatedAssignmentsResponse>, AppError> {
    let assignments = AssignmentService::get_assignments(&state.db, filters).await?;

    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = Assignment),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = AssignmentService::get_assignment_by_id(&state.db, id).await?;

    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentDto,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 404, description = "Assignment not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state, dto))]
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAssignmentDto>,
) -> Result<Json<Assignment>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let assignment = AssignmentService::update_assignment(&state.db, id, dto).await?;

    Ok(Json(assignment))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AssignmentService::delete_assignment(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
