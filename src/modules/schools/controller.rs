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
    CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, UpdateSchoolDto,
};
use super::service::SchoolService;

#[utoipa::path(
    post,
    path = "/api/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created", body = School),
        (status = 422, description = "Invalid input")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn create_school(
    State(state): State<AppState>,
    Json(dto): Json<CreateSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let school = SchoolService::create_school(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(school)))
}

#[utoipa::path(
    get,
    path = "/api/schools",
    params(SchoolFilterParams),
    responses(
        (status = 200, description = "List of schools", body = PaginatedSchoolsResponse)
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn get_schools(
    State(state): State<AppState>,
    Query(filters): Query<SchoolFilterParams>,
) -> Result<Json<PaginatedSchoolsResponse>, AppError> {
    let schools = SchoolService::get_schools(&state.db, filters).await?;

    Ok(Json(schools))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School details", body = School),
        (status = 404, description = "School not found")
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::get_school_by_id(&state.db, id).await?;

    Ok(Json(school))
}

#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 404, description = "School not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    dto.validate().map_err(AppError::unprocessable)?;

    let school = SchoolService::update_school(&state.db, id, dto).await?;

    Ok(Json(school))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 204, description = "School deleted"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SchoolService::delete_school(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
