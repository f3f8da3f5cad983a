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
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, SubjectFilterParams, UpdateSubjectDto,
};
use super::service::SubjectService;

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 409, description = "Subject name or code already exists"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    Json(dto): Json<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let subject = SubjectService::create_subject(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    params(SubjectFilterParams),
    responses(
        (status = 200, description = "List of subjects", body = PaginatedSubjectsResponse)
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    Query(filters): Query<SubjectFilterParams>,
) -> Result<Json<PaginatedSubjectsResponse>, AppError> {
    let subjects = SubjectService::get_subjects(&state.db, filters).await?;

    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject details", body = Subject),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::get_subject_by_id(&state.db, id).await?;

    Ok(Json(subject))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject name or code already exists"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let subject = SubjectService::update_subject(&state.db, id, dto).await?;

    Ok(Json(subject))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SubjectService::delete_subject(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
