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
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use super::service::TeacherService;

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "School or user does not exist"),
        (status = 409, description = "User already linked to a teacher"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(dto): Json<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let teacher = TeacherService::create_teacher(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "List of teachers", body = PaginatedTeachersResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Query(filters): Query<TeacherFilterParams>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let teachers = TeacherService::get_teachers(&state.db, filters).await?;

    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.db, id).await?;

    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 404, description = "Teacher not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;

    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
