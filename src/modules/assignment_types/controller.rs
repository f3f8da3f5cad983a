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
    AssignmentType, AssignmentTypeFilterParams, CreateAssignmentTypeDto,
    PaginatedAssignmentTypesResponse, UpdateAssignmentTypeDto,
};
use super::service::AssignmentTypeService;

#[utoipa::path(
    post,
    path = "/api/assignment-types",
    request_body = CreateAssignmentTypeDto,
    responses(
        (status = 201, description = "Assignment type created", body = AssignmentType),
        (status = 400, description = "Lesson does not exist"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Assignment Types"
)]
#[instrument(skip(state, dto))]
pub async fn create_assignment_type(
    State(state): State<AppState>,
    Json(dto): Json<CreateAssignmentTypeDto>,
) -> Result<(StatusCode, Json<AssignmentType>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let assignment_type = AssignmentTypeService::create_assignment_type(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(assignment_type)))
}

#[utoipa::path(
    get,
    path = "/api/assignment-types",
    params(AssignmentTypeFilterParams),
    responses(
        (status = 200, description = "List of assignment types", body = PaginatedAssignmentTypesResponse)
    ),
    tag = "Assignment Types"
)]
#[instrument(skip(state))]
pub async fn get_assignment_types(
    State(state): State<AppState>,
    Query(filters): Query<AssignmentTypeFilterParams>,
) -> Result<Json<PaginatedAssignmentTypesResponse>, AppError> {
    let assignment_types = AssignmentTypeService::get_assignment_types(&state.db, filters).await?;

    Ok(Json(assignment_types))
}

#[utoipa::path(
    get,
    path = "/api/assignment-types/{id}",
    params(("id" = Uuid, Path, description = "Assignment type ID")),
    responses(
        (status = 200, description = "Assignment type details", body = AssignmentType),
        (status = 404, description = "Assignment type not found")
    ),
    tag = "Assignment Types"
)]
#[instrument(skip(state))]
pub async fn get_assignment_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentType>, AppError> {
    let assignment_type = AssignmentTypeService::get_assignment_type_by_id(&state.db, id).await?;

    Ok(Json(assignment_type))
}

#[utoipa::path(
    put,
    path = "/api/assignment-types/{id}",
    params(("id" = Uuid, Path, description = "Assignment type ID")),
    request_body = UpdateAssignmentTypeDto,
    responses(
        (status = 200, description = "Assignment type updated", body = AssignmentType),
        (status = 404, description = "Assignment type not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Assignment Types"
)]
#[instrument(skip(state, dto))]
pub async fn update_assignment_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAssignmentTypeDto>,
) -> Result<Json<AssignmentType>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let assignment_type = AssignmentTypeService::update_assignment_type(&state.db, id, dto).await?;

    Ok(Json(assignment_type))
}

#[utoipa::path(
    delete,
    path = "/api/assignment-types/{id}",
    params(("id" = Uuid, Path, description = "Assignment type ID")),
    responses(
        (status = 204, description = "Assignment type deleted"),
        (status = 404, description = "Assignment type not found")
    ),
    tag = "Assignment Types"
)]
#[instrument(skip(state))]
pub async fn delete_assignment_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AssignmentTypeService::delete_assignment_type(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
